// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供配置仓库接口的数据库实现和进程内实现
pub mod memory_settings_repo;
pub mod settings_repo_impl;
