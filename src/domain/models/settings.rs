// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::DefaultsSettings;
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// 默认主色调
pub const DEFAULT_PRIMARY_COLOR: &str = "#1976d2";

/// 配置记录
///
/// 系统中唯一的配置文档，包含主题、SMTP 和支付网关三个分组。
/// 整个部署只存在一条记录，首次读取或写入时按默认值创建。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRecord {
    /// 主题配置
    pub theme: ThemeSettings,
    /// SMTP 配置
    pub smtp: SmtpSettings,
    /// 支付网关配置
    pub gateway: GatewaySettings,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 最后更新时间
    pub updated_at: DateTime<Utc>,
}

impl SettingsRecord {
    /// 使用默认值构造配置记录
    ///
    /// 默认值只在这里定义一次，SMTP 和网关的默认值来自配置文件或环境变量
    ///
    /// # 参数
    ///
    /// * `defaults` - 首次启动默认值
    /// * `now` - 创建时间
    pub fn with_defaults(defaults: &DefaultsSettings, now: DateTime<Utc>) -> Self {
        let smtp = &defaults.smtp;
        Self {
            theme: ThemeSettings::default(),
            smtp: SmtpSettings {
                host: smtp.host.clone(),
                port: smtp.port,
                user: smtp.user.clone(),
                pass: smtp.pass.clone(),
                encryption: Encryption::parse(&smtp.encryption),
                from_name: smtp.from_name.clone(),
                from_email: smtp.from_email.clone(),
            },
            gateway: GatewaySettings {
                provider: defaults.gateway.provider.clone(),
                api_key: defaults.gateway.api_key.clone(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// 合并部分更新
    ///
    /// 按分组浅合并：请求中出现的分组只覆盖其中出现的字段，
    /// 未出现的字段和分组保持原值。
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(theme) = patch.theme {
            self.theme.apply(theme);
        }
        if let Some(smtp) = patch.smtp {
            self.smtp.apply(smtp);
        }
        if let Some(gateway) = patch.gateway {
            self.gateway.apply(gateway);
        }
    }
}

/// 主题模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// 用户自定义颜色
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserColor {
    pub name: String,
    pub hex: String,
}

/// 主题配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub mode: ThemeMode,
    pub primary_color: String,
    pub user_defined_colors: Vec<UserColor>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            user_defined_colors: Vec::new(),
        }
    }
}

impl ThemeSettings {
    fn apply(&mut self, patch: ThemePatch) {
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
        if let Some(primary_color) = patch.primary_color {
            self.primary_color = primary_color;
        }
        // Replaced as a whole
        if let Some(colors) = patch.user_defined_colors {
            self.user_defined_colors = colors;
        }
    }
}

/// SMTP 加密方式
///
/// 反序列化时不区分大小写，未知值按 `none` 处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encryption {
    /// 隐式 TLS（通常为 465 端口）
    Ssl,
    /// STARTTLS
    #[default]
    Tls,
    /// 不加密
    None,
}

impl Encryption {
    /// 解析加密方式字符串
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "SSL" => Encryption::Ssl,
            "TLS" => Encryption::Tls,
            _ => Encryption::None,
        }
    }

    /// 线上格式
    pub fn as_str(&self) -> &'static str {
        match self {
            Encryption::Ssl => "SSL",
            Encryption::Tls => "TLS",
            Encryption::None => "none",
        }
    }

    /// 是否使用隐式 TLS 连接
    pub fn is_secure(&self) -> bool {
        matches!(self, Encryption::Ssl)
    }
}

impl Serialize for Encryption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Encryption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Encryption::parse(&value))
    }
}

/// SMTP 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub encryption: Encryption,
    pub from_name: String,
    pub from_email: String,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 587,
            user: String::new(),
            pass: String::new(),
            encryption: Encryption::Tls,
            from_name: String::new(),
            from_email: String::new(),
        }
    }
}

impl SmtpSettings {
    fn apply(&mut self, patch: SmtpPatch) {
        if let Some(host) = patch.host {
            self.host = host;
        }
        if let Some(port) = patch.port {
            self.port = port;
        }
        if let Some(user) = patch.user {
            self.user = user;
        }
        if let Some(pass) = patch.pass {
            self.pass = pass;
        }
        if let Some(encryption) = patch.encryption {
            self.encryption = encryption;
        }
        if let Some(from_name) = patch.from_name {
            self.from_name = from_name;
        }
        if let Some(from_email) = patch.from_email {
            self.from_email = from_email;
        }
    }

    /// 发送邮件所需的字段（host、port、user、pass）是否齐全
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && self.port != 0 && !self.user.is_empty() && !self.pass.is_empty()
    }
}

/// 支付网关配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatewaySettings {
    pub provider: String,
    pub api_key: String,
}

impl GatewaySettings {
    fn apply(&mut self, patch: GatewayPatch) {
        if let Some(provider) = patch.provider {
            self.provider = provider;
        }
        if let Some(api_key) = patch.api_key {
            self.api_key = api_key;
        }
    }
}

/// 配置部分更新请求
///
/// 所有字段都是可选的，`null` 与缺省等价
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub theme: Option<ThemePatch>,
    pub smtp: Option<SmtpPatch>,
    pub gateway: Option<GatewayPatch>,
}

/// 主题部分更新
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    pub mode: Option<ThemeMode>,
    pub primary_color: Option<String>,
    pub user_defined_colors: Option<Vec<UserColor>>,
}

/// SMTP 部分更新
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpPatch {
    pub host: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_port")]
    pub port: Option<u16>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub encryption: Option<Encryption>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
}

/// 支付网关部分更新
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayPatch {
    pub provider: Option<String>,
    pub api_key: Option<String>,
}

/// 端口既可以是数字也可以是数字字符串（表单原样提交）
#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u16),
    Text(String),
}

impl PortRepr {
    fn into_port<E: de::Error>(self) -> Result<u16, E> {
        match self {
            PortRepr::Number(port) => Ok(port),
            PortRepr::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(0);
                }
                text.parse::<u16>()
                    .map_err(|_| E::custom(format!("invalid port: {}", text)))
            }
        }
    }
}

fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    PortRepr::deserialize(deserializer)?.into_port()
}

fn deserialize_optional_port<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u16>, D::Error> {
    Option::<PortRepr>::deserialize(deserializer)?
        .map(PortRepr::into_port)
        .transpose()
}
