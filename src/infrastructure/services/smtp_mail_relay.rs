// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::mail::{OutgoingMail, RelayConfig};
use crate::domain::services::mail_relay::{MailError, MailRelay};
use async_trait::async_trait;
use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

/// 基于 lettre 的 SMTP 邮件中继
///
/// 每次发送都会新建一个传输实例，发送完成后即丢弃
#[derive(Debug, Clone, Default)]
pub struct SmtpMailRelay;

impl SmtpMailRelay {
    pub fn new() -> Self {
        Self
    }

    /// 根据连接参数构造 SMTP 传输
    ///
    /// `secure` 为 true 时使用隐式 TLS，否则先明文连接，服务器支持时升级 STARTTLS
    pub fn build_transport(
        relay: &RelayConfig,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let parameters = TlsParameters::new(relay.host.clone())
            .map_err(|e| MailError::Transport(e.to_string()))?;
        let tls = if relay.secure {
            Tls::Wrapper(parameters)
        } else {
            Tls::Opportunistic(parameters)
        };

        Ok(
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(relay.host.as_str())
                .port(relay.port)
                .tls(tls)
                .credentials(Credentials::new(relay.user.clone(), relay.pass.clone()))
                .build(),
        )
    }

    /// 构造纯文本邮件
    pub fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
        let from_address: Address = mail
            .from_email
            .parse()
            .map_err(|e: AddressError| invalid_address(&mail.from_email, e))?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e: AddressError| invalid_address(&mail.to, e))?;

        Message::builder()
            .from(Mailbox::new(Some(mail.from_name.clone()), from_address))
            .to(to)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

fn invalid_address(address: &str, err: AddressError) -> MailError {
    MailError::InvalidAddress {
        address: address.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl MailRelay for SmtpMailRelay {
    async fn send(&self, relay: &RelayConfig, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = Self::build_message(mail)?;
        let transport = Self::build_transport(relay)?;

        debug!(
            "Connecting to SMTP relay {}:{} (secure: {})",
            relay.host, relay.port, relay.secure
        );
        transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(())
    }
}
