// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 配置记录（settings）：主题、SMTP、支付网关三个分组及其部分更新
/// - 邮件（mail）：由 SMTP 配置派生的中继参数和测试邮件
pub mod mail;
pub mod settings;
