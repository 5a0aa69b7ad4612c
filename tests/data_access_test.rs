//! Data-access operations over the in-memory store

mod helpers;

use std::sync::Arc;
use assert_matches::assert_matches;
use chrono::Duration;
use ghostshield::database::repositories::collections;
use ghostshield::database::{DocumentStore, FieldValue, Fields, MemoryStore};
use ghostshield::models::{ModerationSettings, UserProfile};
use ghostshield::utils::errors::{ConsoleError, StoreError, ValidationError};
use helpers::*;

#[tokio::test]
async fn test_list_verified_is_capped_and_newest_first() {
    let ctx = TestContext::new();
    for i in 0..25 {
        // Interleave insert order so ordering cannot come from insertion
        let minutes = (i * 7) % 25;
        seed_verified(&ctx.store, 1000 + i, Some("user"), None, minutes).await;
    }

    let verified = ctx.db().list_verified(20).await.unwrap();
    assert_eq!(verified.len(), 20);
    for pair in verified.windows(2) {
        assert!(pair[0].verified_at >= pair[1].verified_at);
    }
    assert_eq!(verified[0].verified_at, Some(base_time() + Duration::minutes(24)));
}

#[tokio::test]
async fn test_list_verified_defaults_missing_names() {
    let ctx = TestContext::new();
    seed_verified(&ctx.store, 7, None, None, 1).await;

    let verified = ctx.db().list_verified(20).await.unwrap();
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].user_id, Some(7));
    assert_eq!(verified[0].first_name, "");
    assert_eq!(verified[0].username, "");
}

#[tokio::test]
async fn test_count_violations_counts_everything() {
    let ctx = TestContext::new();
    assert_eq!(ctx.db().count_violations().await.unwrap(), 0);

    seed_violation(&ctx.store, 1).await;
    seed_violation(&ctx.store, 1).await;
    seed_violation(&ctx.store, 2).await;
    assert_eq!(ctx.db().count_violations().await.unwrap(), 3);

    let dashboard = ctx.db().dashboard().await.unwrap();
    assert_eq!(dashboard.violation_count, 3);
    assert!(dashboard.verified.is_empty());
}

#[tokio::test]
async fn test_delete_verified_is_idempotent() {
    let ctx = TestContext::new();
    let doc_id = seed_verified(&ctx.store, 5, Some("Sara"), Some("sara"), 1).await;
    let keep = seed_verified(&ctx.store, 6, Some("Omar"), None, 2).await;

    ctx.db().delete_verified(&doc_id).await.unwrap();
    let remaining = ctx.db().list_verified(20).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].doc_id, keep);

    assert!(ctx.db().delete_verified(&doc_id).await.is_ok());
    assert!(ctx.db().delete_verified("never-existed").await.is_ok());
}

#[tokio::test]
async fn test_clear_all_verified() {
    let ctx = TestContext::new();
    for i in 0..30 {
        seed_verified(&ctx.store, i, None, None, i).await;
    }

    assert_eq!(ctx.db().clear_all_verified().await.unwrap(), 30);
    assert_eq!(ctx.store.len(collections::VERIFIED_USERS).await, 0);
    assert_eq!(ctx.db().clear_all_verified().await.unwrap(), 0);
}

#[tokio::test]
async fn test_clear_all_continues_past_failed_delete() {
    let store = MemoryStore::new();
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(seed_verified(&store, i, None, None, i).await);
    }
    let blocked = ids[2].clone();
    let backend = FaultyStore::new(store.clone()).fail_delete(&blocked);
    let ctx = TestContext::with_backend(store, Arc::new(backend));

    assert_matches!(
        ctx.db().clear_all_verified().await,
        Err(StoreError::Rejected { status: 403, message }) if message == FAULT_MESSAGE
    );

    let remaining = ctx.db().list_verified(20).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].doc_id, blocked);
}

#[tokio::test]
async fn test_add_allowed_chat_survives_failed_read_back() {
    let store = MemoryStore::new();
    let backend = FaultyStore::new(store.clone()).fail_gets();
    let ctx = TestContext::with_backend(store, Arc::new(backend));

    let chat = ctx.db().add_allowed_chat("-100777").await.unwrap();
    assert_eq!(chat.chat_id, -100777);
    assert!(chat.added_at.is_none());

    let document = ctx.store.get(collections::ALLOWED_CHATS, "-100777").await.unwrap().unwrap();
    assert!(document.timestamp_field("added_at").is_some());
}

#[tokio::test]
async fn test_blacklist_newest_first_with_labels() {
    let ctx = TestContext::new();
    seed_blacklist(&ctx.store, 1, Some(base_time())).await;
    seed_blacklist(&ctx.store, 2, Some(base_time() + Duration::hours(3))).await;
    let undated = seed_blacklist(&ctx.store, 3, None).await;

    let entries = ctx.db().list_blacklist().await.unwrap();
    let users: Vec<Option<i64>> = entries.iter().map(|e| e.user_id).collect();
    // Entries without a timestamp drop out of an ordered query
    assert_eq!(users, vec![Some(2), Some(1)]);
    assert_eq!(entries[0].added_at_label(), "2024-01-01 11:00:00");

    ctx.db().delete_blacklist_entry(&undated).await.unwrap();
    assert!(ctx.db().delete_blacklist_entry(&undated).await.is_ok());
    assert_eq!(ctx.store.len(collections::BLACKLIST).await, 2);
}

#[tokio::test]
async fn test_add_allowed_chat_uses_canonical_id() {
    let ctx = TestContext::new();

    let chat = ctx.db().add_allowed_chat(" -001001234567890 ").await.unwrap();
    assert_eq!(chat.chat_id, -1001234567890);
    assert!(chat.added_at.is_some());

    let document = ctx.store.get(collections::ALLOWED_CHATS, "-1001234567890").await.unwrap();
    let document = document.expect("document stored under canonical id");
    assert_eq!(document.field("chat_id"), Some(&FieldValue::Integer(-1001234567890)));

    let chats = ctx.db().list_allowed_chats().await.unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].chat_id, -1001234567890);
}

#[tokio::test]
async fn test_add_allowed_chat_twice_overwrites() {
    let ctx = TestContext::new();
    ctx.db().add_allowed_chat("42").await.unwrap();
    ctx.db().add_allowed_chat("+42").await.unwrap();

    assert_eq!(ctx.db().list_allowed_chats().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_allowed_chat_rejects_non_numbers() {
    let ctx = TestContext::new();
    ctx.db().add_allowed_chat("100").await.unwrap();

    for input in ["abc", "", "12a", "1.5", "--3"] {
        assert_matches!(
            ctx.db().add_allowed_chat(input).await,
            Err(ConsoleError::Validation(ValidationError::NotANumber { .. }))
        );
    }

    let chats = ctx.db().list_allowed_chats().await.unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].chat_id, 100);
}

#[tokio::test]
async fn test_remove_allowed_chat_is_idempotent() {
    let ctx = TestContext::new();
    ctx.db().add_allowed_chat("-55").await.unwrap();

    ctx.db().remove_allowed_chat("-55").await.unwrap();
    assert!(ctx.db().list_allowed_chats().await.unwrap().is_empty());
    assert!(ctx.db().remove_allowed_chat("-55").await.is_ok());
}

#[tokio::test]
async fn test_user_detail_placeholder_for_unknown_user() {
    let ctx = TestContext::new();
    seed_violation(&ctx.store, 42).await;
    seed_violation(&ctx.store, 42).await;
    seed_violation(&ctx.store, 43).await;
    seed_blacklist(&ctx.store, 42, None).await;

    let detail = ctx.db().get_user_detail("42").await.unwrap();
    assert_eq!(detail.user, UserProfile::placeholder(42));
    assert_eq!(detail.violation_count, 2);
    assert!(detail.in_blacklist);
}

#[tokio::test]
async fn test_user_detail_for_verified_user() {
    let ctx = TestContext::new();
    seed_verified(&ctx.store, 9, Some("Yusuf"), Some("yusuf_9"), 3).await;

    let detail = ctx.db().get_user_detail("9").await.unwrap();
    assert_eq!(detail.user.first_name, "Yusuf");
    assert_eq!(detail.user.username, "yusuf_9");
    assert_eq!(detail.violation_count, 0);
    assert!(!detail.in_blacklist);
}

#[tokio::test]
async fn test_user_detail_rejects_non_numeric_id() {
    let ctx = TestContext::new();
    assert_matches!(
        ctx.db().get_user_detail("ghost").await,
        Err(ConsoleError::Validation(ValidationError::NotANumber { input })) if input == "ghost"
    );
}

#[tokio::test]
async fn test_settings_default_to_all_off() {
    let ctx = TestContext::new();
    assert_eq!(ctx.db().get_settings().await.unwrap(), ModerationSettings::default());
}

#[tokio::test]
async fn test_save_settings_overwrites_wholesale() {
    let ctx = TestContext::new();
    ctx.db()
        .save_settings(&ModerationSettings {
            night_mode: true,
            block_media: true,
            kick_links: true,
            verify_new_users: true,
        })
        .await
        .unwrap();

    ctx.db()
        .save_settings(&ModerationSettings {
            night_mode: true,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(
        ctx.db().get_settings().await.unwrap(),
        ModerationSettings {
            night_mode: true,
            block_media: false,
            kick_links: false,
            verify_new_users: false,
        }
    );
}

#[tokio::test]
async fn test_settings_ignore_foreign_fields() {
    let ctx = TestContext::new();
    let document = Fields::from([
        ("block_media".to_string(), FieldValue::Boolean(true)),
        ("note".to_string(), FieldValue::String("set by bot".to_string())),
    ]);
    ctx.store.set(collections::SETTINGS, "main", document).await.unwrap();

    let settings = ctx.db().get_settings().await.unwrap();
    assert!(settings.block_media);
    assert!(!settings.night_mode);
}
