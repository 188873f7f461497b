// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DefaultsSettings;
use crate::domain::models::settings::{SettingsPatch, SettingsRecord};
use crate::domain::repositories::settings_repository::{RepositoryError, SettingsRepository};
use crate::infrastructure::database::connection::DatabaseHandle;
use crate::infrastructure::database::entities::settings::{self, SINGLETON_ID};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Set, TransactionTrait};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// 配置仓库的数据库实现
///
/// 整张表只有 id = 1 的一行，写操作经 `write_lock` 串行执行
#[derive(Clone)]
pub struct SettingsRepositoryImpl {
    db: Arc<DatabaseHandle>,
    defaults: DefaultsSettings,
    write_lock: Arc<Mutex<()>>,
}

impl SettingsRepositoryImpl {
    /// 创建新的配置仓库实现
    pub fn new(db: Arc<DatabaseHandle>, defaults: DefaultsSettings) -> Self {
        Self {
            db,
            defaults,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load<C: ConnectionTrait>(db: &C) -> Result<Option<SettingsRecord>, RepositoryError> {
        match settings::Entity::find_by_id(SINGLETON_ID).one(db).await? {
            Some(model) => Ok(Some(model.try_into()?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryImpl {
    async fn find(&self) -> Result<Option<SettingsRecord>, RepositoryError> {
        let db = self.db.connection().await?;
        Self::load(db).await
    }

    async fn get_or_create(&self) -> Result<SettingsRecord, RepositoryError> {
        let db = self.db.connection().await?;
        if let Some(record) = Self::load(db).await? {
            return Ok(record);
        }

        let _guard = self.write_lock.lock().await;
        let record = SettingsRecord::with_defaults(&self.defaults, Utc::now());
        let inserted = settings::Entity::insert(to_active_model(&record)?)
            .on_conflict(
                OnConflict::column(settings::Column::Id)
                    .do_nothing_on([settings::Column::Id])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        if inserted > 0 {
            info!("Created default settings record");
        }

        // Re-read: another request may have inserted first
        Self::load(db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("settings row missing after insert".into()).into())
    }

    async fn update(&self, patch: SettingsPatch) -> Result<SettingsRecord, RepositoryError> {
        let db = self.db.connection().await?;
        let _guard = self.write_lock.lock().await;
        let txn = db.begin().await?;

        let now = Utc::now();
        let mut record = match Self::load(&txn).await? {
            Some(record) => record,
            None => SettingsRecord::with_defaults(&self.defaults, now),
        };
        record.apply(patch);
        record.updated_at = now;

        settings::Entity::insert(to_active_model(&record)?)
            .on_conflict(
                OnConflict::column(settings::Column::Id)
                    .update_columns([
                        settings::Column::Theme,
                        settings::Column::Smtp,
                        settings::Column::Gateway,
                        settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        txn.commit().await?;

        Ok(record)
    }
}

fn to_active_model(record: &SettingsRecord) -> Result<settings::ActiveModel, serde_json::Error> {
    Ok(settings::ActiveModel {
        id: Set(SINGLETON_ID),
        theme: Set(serde_json::to_value(&record.theme)?),
        smtp: Set(serde_json::to_value(&record.smtp)?),
        gateway: Set(serde_json::to_value(&record.gateway)?),
        created_at: Set(record.created_at.into()),
        updated_at: Set(record.updated_at.into()),
    })
}

impl TryFrom<settings::Model> for SettingsRecord {
    type Error = serde_json::Error;

    fn try_from(model: settings::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            theme: serde_json::from_value(model.theme)?,
            smtp: serde_json::from_value(model.smtp)?,
            gateway: serde_json::from_value(model.gateway)?,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}
