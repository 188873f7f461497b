// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 邮件中继（mail_relay）：发送邮件的抽象接口
/// - 配置服务（settings_service）：读取、合并更新配置以及发送测试邮件
pub mod mail_relay;
pub mod settings_service;
