// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::settings::SmtpSettings;

/// 未设置发件人名称时使用的名称
pub const DEFAULT_FROM_NAME: &str = "Admin Panel";
/// 测试邮件主题
pub const TEST_SUBJECT: &str = "Test Email";
/// 测试邮件正文
pub const TEST_BODY: &str = "This is a test email from your SMTP configuration.";

/// 邮件中继连接参数
///
/// 每次发送时由已保存的 SMTP 配置临时构造，不在请求之间复用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    /// 为 true 时使用隐式 TLS，否则使用明文连接并在服务器支持时升级 STARTTLS
    pub secure: bool,
    pub user: String,
    pub pass: String,
}

impl RelayConfig {
    /// 从 SMTP 配置构造中继参数
    ///
    /// host、port、user、pass 任一缺失时返回 `None`
    pub fn from_smtp(smtp: &SmtpSettings) -> Option<Self> {
        if !smtp.is_complete() {
            return None;
        }

        Some(Self {
            host: smtp.host.clone(),
            port: smtp.port,
            secure: smtp.encryption.is_secure(),
            user: smtp.user.clone(),
            pass: smtp.pass.clone(),
        })
    }
}

/// 待发送的邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from_name: String,
    pub from_email: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// 构造 SMTP 测试邮件
    ///
    /// 发件人名称默认为 "Admin Panel"，发件地址默认为 SMTP 用户名
    pub fn smtp_test(smtp: &SmtpSettings, recipient: &str) -> Self {
        let from_name = if smtp.from_name.is_empty() {
            DEFAULT_FROM_NAME.to_string()
        } else {
            smtp.from_name.clone()
        };
        let from_email = if smtp.from_email.is_empty() {
            smtp.user.clone()
        } else {
            smtp.from_email.clone()
        };

        Self {
            from_name,
            from_email,
            to: recipient.to_string(),
            subject: TEST_SUBJECT.to_string(),
            body: TEST_BODY.to_string(),
        }
    }
}
