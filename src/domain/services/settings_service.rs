// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mail::{OutgoingMail, RelayConfig};
use crate::domain::models::settings::{SettingsPatch, SettingsRecord};
use crate::domain::repositories::settings_repository::{RepositoryError, SettingsRepository};
use crate::domain::services::mail_relay::{MailError, MailRelay};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// 配置服务错误
#[derive(Error, Debug)]
pub enum SettingsServiceError {
    /// 请求缺少收件人
    #[error("recipientEmail is required")]
    MissingRecipient,
    /// SMTP 配置不完整
    #[error("SMTP settings are incomplete. Save SMTP settings first.")]
    IncompleteSmtp,
    /// 存储错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    /// 邮件发送错误
    #[error(transparent)]
    Mail(#[from] MailError),
}

/// 配置服务
///
/// 协调配置仓库和邮件中继，是 HTTP 层唯一依赖的领域入口
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
    mailer: Arc<dyn MailRelay>,
}

impl SettingsService {
    /// 创建配置服务
    pub fn new(repo: Arc<dyn SettingsRepository>, mailer: Arc<dyn MailRelay>) -> Self {
        Self { repo, mailer }
    }

    /// 获取配置记录，不存在时创建
    pub async fn get(&self) -> Result<SettingsRecord, RepositoryError> {
        self.repo.get_or_create().await
    }

    /// 合并部分更新
    pub async fn update(&self, patch: SettingsPatch) -> Result<SettingsRecord, RepositoryError> {
        let record = self.repo.update(patch).await?;
        debug!("Settings updated at {}", record.updated_at);
        Ok(record)
    }

    /// 使用已保存的 SMTP 配置发送测试邮件
    ///
    /// 校验失败时不会发起任何网络请求
    ///
    /// # 参数
    ///
    /// * `recipient` - 收件人地址，缺失或为空时返回 `MissingRecipient`
    pub async fn send_test_email(
        &self,
        recipient: Option<&str>,
    ) -> Result<(), SettingsServiceError> {
        let recipient = match recipient {
            Some(recipient) if !recipient.is_empty() => recipient,
            _ => return Err(SettingsServiceError::MissingRecipient),
        };

        // No record yet means incomplete
        let record = self
            .repo
            .find()
            .await?
            .ok_or(SettingsServiceError::IncompleteSmtp)?;
        let relay =
            RelayConfig::from_smtp(&record.smtp).ok_or(SettingsServiceError::IncompleteSmtp)?;

        let mail = OutgoingMail::smtp_test(&record.smtp, recipient);
        self.mailer.send(&relay, &mail).await?;

        info!(
            "Test email sent to {} via {}:{} (secure: {})",
            recipient, relay.host, relay.port, relay.secure
        );
        Ok(())
    }
}
