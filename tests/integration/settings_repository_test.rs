// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{pooled_sqlite_settings, sqlite_repo, sqlite_settings};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use settingsd::config::settings::{DefaultsSettings, SmtpDefaults};
use settingsd::domain::models::settings::{Encryption, SettingsPatch, ThemeMode};
use settingsd::domain::repositories::settings_repository::{RepositoryError, SettingsRepository};
use settingsd::infrastructure::database::connection::DatabaseHandle;
use settingsd::infrastructure::database::entities::settings;
use settingsd::infrastructure::repositories::settings_repo_impl::SettingsRepositoryImpl;
use std::sync::Arc;
use tokio::task::JoinSet;

fn patch(value: serde_json::Value) -> SettingsPatch {
    serde_json::from_value(value).unwrap()
}

fn env_defaults() -> DefaultsSettings {
    DefaultsSettings {
        smtp: SmtpDefaults {
            host: "smtp.env.test".to_string(),
            user: "env-user".to_string(),
            ..SmtpDefaults::default()
        },
        ..DefaultsSettings::default()
    }
}

async fn row_count(db: &DatabaseHandle) -> u64 {
    settings::Entity::find()
        .count(db.connection().await.unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_get_or_create_is_idempotent() {
    let (db, repo) = sqlite_repo(env_defaults());

    let first = repo.get_or_create().await.unwrap();
    let second = repo.get_or_create().await.unwrap();

    assert_eq!(first.theme, second.theme);
    assert_eq!(first.smtp, second.smtp);
    assert_eq!(first.gateway, second.gateway);
    assert_eq!(first.smtp.host, "smtp.env.test");
    assert_eq!(first.smtp.user, "env-user");
    assert_eq!(row_count(&db).await, 1);
}

#[tokio::test]
async fn test_concurrent_creation_yields_one_row() {
    let (db, repo) = sqlite_repo(DefaultsSettings::default());

    let (a, b) = tokio::join!(repo.get_or_create(), repo.get_or_create());

    assert_eq!(a.unwrap().smtp, b.unwrap().smtp);
    assert_eq!(row_count(&db).await, 1);
}

#[tokio::test]
async fn test_find_does_not_create() {
    let (db, repo) = sqlite_repo(DefaultsSettings::default());

    assert!(repo.find().await.unwrap().is_none());
    assert_eq!(row_count(&db).await, 0);
}

#[tokio::test]
async fn test_update_preserves_sibling_fields() {
    let (_db, repo) = sqlite_repo(DefaultsSettings::default());
    repo.update(patch(json!({
        "smtp": { "host": "a", "port": 25, "user": "u", "pass": "p" }
    })))
    .await
    .unwrap();

    let updated = repo.update(patch(json!({ "smtp": { "port": 465 } }))).await.unwrap();
    assert_eq!(updated.smtp.host, "a");
    assert_eq!(updated.smtp.port, 465);

    let stored = repo.find().await.unwrap().unwrap();
    assert_eq!(stored.smtp.host, "a");
    assert_eq!(stored.smtp.port, 465);
    assert_eq!(stored.smtp.user, "u");
    assert_eq!(stored.smtp.pass, "p");
}

#[tokio::test]
async fn test_update_without_record_applies_patch_over_defaults() {
    let (db, repo) = sqlite_repo(env_defaults());

    let record = repo
        .update(patch(json!({ "smtp": { "encryption": "SSL" }, "theme": { "mode": "dark" } })))
        .await
        .unwrap();

    assert_eq!(record.smtp.encryption, Encryption::Ssl);
    assert_eq!(record.smtp.host, "smtp.env.test");
    assert_eq!(record.theme.mode, ThemeMode::Dark);
    assert_eq!(row_count(&db).await, 1);
}

#[tokio::test]
async fn test_update_keeps_created_at_and_moves_updated_at() {
    let (_db, repo) = sqlite_repo(DefaultsSettings::default());
    let created = repo.get_or_create().await.unwrap();

    let updated = repo
        .update(patch(json!({ "gateway": { "provider": "stripe" } })))
        .await
        .unwrap();
    let stored = repo.find().await.unwrap().unwrap();

    assert_eq!(stored.created_at, created.created_at);
    assert!(stored.updated_at >= created.updated_at);
    assert_eq!(stored.gateway.provider, "stripe");
    assert_eq!(updated.gateway, stored.gateway);
}

#[tokio::test]
async fn test_records_survive_a_new_repository_on_the_same_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("settings.db").display());

    let first = SettingsRepositoryImpl::new(
        Arc::new(DatabaseHandle::new(sqlite_settings(url.clone()))),
        DefaultsSettings::default(),
    );
    first
        .update(patch(json!({ "gateway": { "apiKey": "sk_test_123" } })))
        .await
        .unwrap();

    let second = SettingsRepositoryImpl::new(
        Arc::new(DatabaseHandle::new(sqlite_settings(url))),
        env_defaults(),
    );
    let record = second.get_or_create().await.unwrap();

    assert_eq!(record.gateway.api_key, "sk_test_123");
    // Defaults only apply to a brand new record
    assert_eq!(record.smtp.host, "");
}

#[tokio::test]
async fn test_unavailable_database_fails_lazily_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let missing_dir = dir.path().join("not-yet-created");
    let url = format!("sqlite://{}?mode=rwc", missing_dir.join("settings.db").display());

    let db = Arc::new(DatabaseHandle::new(sqlite_settings(url)));
    let repo = SettingsRepositoryImpl::new(db.clone(), DefaultsSettings::default());

    let err = repo.get_or_create().await.unwrap_err();
    assert!(matches!(err, RepositoryError::Database(_)));
    assert!(!db.is_connected());

    std::fs::create_dir_all(&missing_dir).unwrap();

    repo.get_or_create().await.unwrap();
    assert!(db.is_connected());
}

/// 并发更新不做冲突检测：所有请求都成功，被争用的字段取其中一个写入值
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_are_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("settings.db").display());
    let db = Arc::new(DatabaseHandle::new(pooled_sqlite_settings(url)));
    let repo = Arc::new(SettingsRepositoryImpl::new(db, DefaultsSettings::default()));
    repo.get_or_create().await.unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..16u16 {
        let repo = repo.clone();
        tasks.spawn(async move {
            repo.update(patch(json!({ "smtp": { "port": 1000 + i } }))).await
        });
    }

    let mut failures = Vec::new();
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result.unwrap() {
            failures.push(e.to_string());
        }
    }
    assert!(failures.is_empty(), "updates failed: {:?}", failures);

    let port = repo.find().await.unwrap().unwrap().smtp.port;
    assert!((1000..1016).contains(&port));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_create_and_update_on_pooled_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("settings.db").display());
    let db = Arc::new(DatabaseHandle::new(pooled_sqlite_settings(url)));
    let repo = Arc::new(SettingsRepositoryImpl::new(db.clone(), DefaultsSettings::default()));

    let mut tasks = JoinSet::new();
    for i in 0..8u16 {
        let repo = repo.clone();
        tasks.spawn(async move {
            if i % 2 == 0 {
                repo.get_or_create().await.map(|_| ())
            } else {
                repo.update(patch(json!({ "smtp": { "port": 2000 + i } })))
                    .await
                    .map(|_| ())
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }

    assert_eq!(row_count(&db).await, 1);
}
