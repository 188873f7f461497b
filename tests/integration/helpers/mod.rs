// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use axum_test::TestServer;
use parking_lot::Mutex;
use settingsd::config::settings::{DatabaseSettings, DefaultsSettings, Settings};
use settingsd::domain::models::mail::{OutgoingMail, RelayConfig};
use settingsd::domain::repositories::settings_repository::SettingsRepository;
use settingsd::domain::services::mail_relay::{MailError, MailRelay};
use settingsd::domain::services::settings_service::SettingsService;
use settingsd::infrastructure::database::connection::DatabaseHandle;
use settingsd::infrastructure::repositories::settings_repo_impl::SettingsRepositoryImpl;
use settingsd::presentation::routes;
use std::sync::Arc;

/// 内存 SQLite 配置
///
/// 每个连接都是独立的内存数据库，所以连接池只保留一个连接
pub fn memory_db_settings() -> DatabaseSettings {
    sqlite_settings("sqlite::memory:".to_string())
}

pub fn sqlite_settings(url: String) -> DatabaseSettings {
    DatabaseSettings {
        url,
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    }
}

/// 文件 SQLite 配置，连接池参数取内置默认值
pub fn pooled_sqlite_settings(url: String) -> DatabaseSettings {
    let settings: Settings = Settings::default_builder()
        .and_then(|builder| builder.build())
        .and_then(|config| config.try_deserialize())
        .expect("Failed to load built-in settings");
    DatabaseSettings {
        url,
        ..settings.database
    }
}

/// 基于内存 SQLite 的配置仓库
pub fn sqlite_repo(defaults: DefaultsSettings) -> (Arc<DatabaseHandle>, Arc<SettingsRepositoryImpl>) {
    let db = Arc::new(DatabaseHandle::new(memory_db_settings()));
    let repo = Arc::new(SettingsRepositoryImpl::new(db.clone(), defaults));
    (db, repo)
}

/// 记录发送请求的邮件中继，不访问网络
#[derive(Default)]
pub struct RecordingRelay {
    pub sent: Mutex<Vec<(RelayConfig, OutgoingMail)>>,
    pub fail_with: Option<String>,
}

impl RecordingRelay {
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn send(&self, relay: &RelayConfig, mail: &OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().push((relay.clone(), mail.clone()));
        match &self.fail_with {
            Some(reason) => Err(MailError::Transport(reason.clone())),
            None => Ok(()),
        }
    }
}

/// 使用给定仓库和中继创建测试服务器
pub fn test_server(repo: Arc<dyn SettingsRepository>, relay: Arc<RecordingRelay>) -> TestServer {
    let service = Arc::new(SettingsService::new(repo, relay));
    TestServer::new(routes::app(service)).expect("Failed to start test server")
}
