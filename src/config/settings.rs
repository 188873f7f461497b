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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、存储后端、数据库以及首次启动时的默认配置值
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 存储后端配置
    pub storage: StorageSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 首次创建配置记录时使用的默认值
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 关系型数据库 (SQLite / PostgreSQL / MySQL)
    Database,
    /// 进程内存储，重启后丢失
    Memory,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储后端 (database, memory)
    pub backend: StorageBackend,
}

/// 数据库配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 默认值配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsSettings {
    /// SMTP 默认值
    #[serde(default)]
    pub smtp: SmtpDefaults,
    /// 支付网关默认值
    #[serde(default)]
    pub gateway: GatewayDefaults,
}

/// SMTP 默认值
///
/// 仅在配置记录第一次创建时写入，之后以数据库中的值为准
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpDefaults {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    /// 加密方式 (SSL, TLS, none)
    pub encryption: String,
    pub from_name: String,
    pub from_email: String,
}

impl Default for SmtpDefaults {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            user: String::new(),
            pass: String::new(),
            encryption: "TLS".to_string(),
            from_name: String::new(),
            from_email: String::new(),
        }
    }
}

/// 支付网关默认值
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayDefaults {
    pub provider: String,
    pub api_key: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 以及 `SETTINGSD__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::default_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("SETTINGSD").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 只包含内置默认值的配置构建器
    pub fn default_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            // Storage
            .set_default("storage.backend", "database")?
            // Default DB pool settings
            .set_default("database.url", "sqlite://settings.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // First-run SMTP values
            .set_default("defaults.smtp.port", 587)?
            .set_default("defaults.smtp.encryption", "TLS")
    }
}
