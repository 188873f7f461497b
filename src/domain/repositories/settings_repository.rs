// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::settings::{SettingsPatch, SettingsRecord};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 存储的 JSON 分组无法解析或无法序列化
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 配置仓库特质
///
/// 管理唯一的一条配置记录。实现方在构造时持有默认值，
/// 记录不存在时按默认值创建。
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// 读取配置记录，不存在时返回 `None`，不会创建
    async fn find(&self) -> Result<Option<SettingsRecord>, RepositoryError>;

    /// 读取配置记录，不存在时按默认值原子地创建
    ///
    /// 多次调用只会产生一条记录
    async fn get_or_create(&self) -> Result<SettingsRecord, RepositoryError>;

    /// 按分组浅合并部分更新并返回合并后的完整记录
    ///
    /// 记录不存在时以默认值为基础合并。并发更新不做冲突检测，后写入者生效。
    async fn update(&self, patch: SettingsPatch) -> Result<SettingsRecord, RepositoryError>;
}
