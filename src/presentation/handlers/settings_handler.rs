// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::settings::{SettingsPatch, SettingsRecord};
use crate::domain::services::settings_service::SettingsService;
use crate::presentation::errors::AppError;
use axum::body::Bytes;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 测试邮件请求
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSmtpRequest {
    pub recipient_email: Option<String>,
}

impl TestSmtpRequest {
    /// 解析请求体
    ///
    /// 空请求体按 `{}` 处理，不要求 `Content-Type: application/json`
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// 只包含提示信息的响应
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 获取配置
///
/// 记录不存在时按默认值创建
pub async fn get_settings(
    Extension(service): Extension<Arc<SettingsService>>,
) -> Result<Json<SettingsRecord>, AppError> {
    let record = service.get().await?;
    Ok(Json(record))
}

/// 部分更新配置
///
/// 请求体中出现的分组按字段浅合并，返回合并后的完整记录
pub async fn update_settings(
    Extension(service): Extension<Arc<SettingsService>>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<SettingsRecord>, AppError> {
    let record = service.update(patch).await?;
    Ok(Json(record))
}

/// 使用已保存的 SMTP 配置发送测试邮件
pub async fn test_smtp(
    Extension(service): Extension<Arc<SettingsService>>,
    body: Bytes,
) -> Result<Json<MessageResponse>, AppError> {
    let request = TestSmtpRequest::from_body(&body)?;
    service
        .send_test_email(request.recipient_email.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: "Test email sent successfully!".to_string(),
    }))
}
