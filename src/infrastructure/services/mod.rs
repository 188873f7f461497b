// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施服务模块
///
/// 提供基础设施层的服务实现
/// 目前只有基于 lettre 的 SMTP 邮件中继
pub mod smtp_mail_relay;
