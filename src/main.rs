// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use settingsd::config::settings::{Settings, StorageBackend};
use settingsd::domain::repositories::settings_repository::SettingsRepository;
use settingsd::domain::services::mail_relay::MailRelay;
use settingsd::domain::services::settings_service::SettingsService;
use settingsd::infrastructure::database::connection::DatabaseHandle;
use settingsd::infrastructure::repositories::memory_settings_repo::InMemorySettingsRepository;
use settingsd::infrastructure::repositories::settings_repo_impl::SettingsRepositoryImpl;
use settingsd::infrastructure::services::smtp_mail_relay::SmtpMailRelay;
use settingsd::presentation::routes;
use settingsd::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting settingsd...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    // 3. Storage
    let repo: Arc<dyn SettingsRepository> = match settings.storage.backend {
        StorageBackend::Database => {
            let db = Arc::new(DatabaseHandle::new(settings.database.clone()));

            // Not fatal, requests retry the connection
            match db.connection().await {
                Ok(_) => info!("Database connection established"),
                Err(e) => error!("Database connection failed: {}", e),
            }

            Arc::new(SettingsRepositoryImpl::new(db, settings.defaults.clone()))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory settings storage, changes are lost on restart");
            Arc::new(InMemorySettingsRepository::new(settings.defaults.clone()))
        }
    };

    // 4. Services
    let mailer: Arc<dyn MailRelay> = Arc::new(SmtpMailRelay::new());
    let service = Arc::new(SettingsService::new(repo, mailer));

    // 5. Start HTTP server
    let app = routes::app(service);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
