// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 数据库（database）：延迟建立的数据库连接和实体映射
/// - 仓库实现（repositories）：配置仓库的数据库实现和进程内实现
/// - 服务（services）：SMTP 邮件中继
///
/// 基础设施层遵循依赖倒置原则，依赖于领域层的抽象接口。
pub mod database;
pub mod repositories;
pub mod services;
