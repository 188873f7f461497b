// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DefaultsSettings;
use crate::domain::models::settings::{SettingsPatch, SettingsRecord};
use crate::domain::repositories::settings_repository::{RepositoryError, SettingsRepository};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

/// 进程内配置仓库
///
/// 记录保存在互斥锁保护的单元中，进程重启后丢失
pub struct InMemorySettingsRepository {
    defaults: DefaultsSettings,
    record: Mutex<Option<SettingsRecord>>,
}

impl InMemorySettingsRepository {
    pub fn new(defaults: DefaultsSettings) -> Self {
        Self {
            defaults,
            record: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettingsRepository {
    async fn find(&self) -> Result<Option<SettingsRecord>, RepositoryError> {
        Ok(self.record.lock().clone())
    }

    async fn get_or_create(&self) -> Result<SettingsRecord, RepositoryError> {
        let mut guard = self.record.lock();
        let record =
            guard.get_or_insert_with(|| SettingsRecord::with_defaults(&self.defaults, Utc::now()));
        Ok(record.clone())
    }

    async fn update(&self, patch: SettingsPatch) -> Result<SettingsRecord, RepositoryError> {
        let now = Utc::now();
        let mut guard = self.record.lock();
        let record = guard.get_or_insert_with(|| SettingsRecord::with_defaults(&self.defaults, now));
        record.apply(patch);
        record.updated_at = now;
        Ok(record.clone())
    }
}
