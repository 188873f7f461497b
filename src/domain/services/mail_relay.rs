// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mail::{OutgoingMail, RelayConfig};
use async_trait::async_trait;
use thiserror::Error;

/// 邮件发送错误
#[derive(Error, Debug)]
pub enum MailError {
    /// 发件人或收件人地址无效
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    /// 邮件构造失败
    #[error("Failed to build message: {0}")]
    Build(String),
    /// 连接、认证或投递失败
    #[error("{0}")]
    Transport(String),
}

/// 邮件中继特质
///
/// 每次调用根据传入的连接参数建立一个临时客户端并发送一封邮件，不做重试
#[async_trait]
pub trait MailRelay: Send + Sync {
    /// 发送邮件
    ///
    /// # 参数
    ///
    /// * `relay` - SMTP 连接参数
    /// * `mail` - 待发送的邮件
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 服务器已接受邮件
    /// * `Err(MailError)` - 发送失败
    async fn send(&self, relay: &RelayConfig, mail: &OutgoingMail) -> Result<(), MailError>;
}
