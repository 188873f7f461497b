// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::repositories::settings_repository::RepositoryError;
use crate::domain::services::settings_service::SettingsServiceError;

/// 读取或更新配置失败时的提示
pub const SERVER_ERROR_MESSAGE: &str = "Server error";
/// 发送测试邮件失败时的提示
pub const SEND_FAILED_MESSAGE: &str = "Failed to send test email";

/// 应用错误类型
///
/// 客户端输入错误返回 400 `{message}`，
/// 存储和邮件错误返回 500 `{message, error}`，`error` 为底层错误原文
#[derive(Debug)]
pub enum AppError {
    /// 请求参数或前置条件不满足
    BadRequest(String),
    /// 存储或邮件中继失败
    Internal {
        message: &'static str,
        source: anyhow::Error,
    },
}

impl AppError {
    /// 构造 500 错误
    pub fn internal(message: &'static str, source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message,
            source: source.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
            }
            AppError::Internal { message, source } => {
                error!("{}: {:?}", message, source);
                let body = Json(json!({
                    "message": message,
                    "error": source.to_string(),
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        Self::internal(SERVER_ERROR_MESSAGE, err)
    }
}

impl From<SettingsServiceError> for AppError {
    fn from(err: SettingsServiceError) -> Self {
        match err {
            SettingsServiceError::MissingRecipient | SettingsServiceError::IncompleteSmtp => {
                Self::BadRequest(err.to_string())
            }
            SettingsServiceError::Repository(_) | SettingsServiceError::Mail(_) => {
                Self::internal(SEND_FAILED_MESSAGE, err)
            }
        }
    }
}
