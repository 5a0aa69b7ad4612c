//! Document fixtures
//!
//! Seed documents the way the bot process writes them.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use ghostshield::database::{FieldValue, Fields, MemoryStore};
use ghostshield::database::repositories::collections;

pub fn base_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 1, 1, 8, 0, 0)
        .unwrap()
}

fn fields(pairs: Vec<(&str, FieldValue)>) -> Fields {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Verified user stamped `minutes` after the base time
pub async fn seed_verified(
    store: &MemoryStore,
    user_id: i64,
    first_name: Option<&str>,
    username: Option<&str>,
    minutes: i64,
) -> String {
    let mut document = fields(vec![
        ("user_id", FieldValue::Integer(user_id)),
        ("verified_at", FieldValue::Timestamp(base_time() + Duration::minutes(minutes))),
    ]);
    if let Some(first_name) = first_name {
        document.insert("first_name".to_string(), FieldValue::String(first_name.to_string()));
    }
    if let Some(username) = username {
        document.insert("username".to_string(), FieldValue::String(username.to_string()));
    }
    store.add(collections::VERIFIED_USERS, document).await.unwrap()
}

pub async fn seed_violation(store: &MemoryStore, user_id: i64) -> String {
    let document = fields(vec![
        ("user_id", FieldValue::Integer(user_id)),
        ("reason", FieldValue::String("link".to_string())),
    ]);
    store.add(collections::VIOLATIONS, document).await.unwrap()
}

pub async fn seed_blacklist(store: &MemoryStore, user_id: i64, added_at: Option<DateTime<FixedOffset>>) -> String {
    let mut document = fields(vec![("user_id", FieldValue::Integer(user_id))]);
    if let Some(added_at) = added_at {
        document.insert("added_at".to_string(), FieldValue::Timestamp(added_at));
    }
    store.add(collections::BLACKLIST, document).await.unwrap()
}

/// Chunk type names of a PNG, `None` if a chunk overruns the buffer or
/// bytes trail the last chunk
pub fn png_chunk_types(bytes: &[u8]) -> Option<Vec<String>> {
    const SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    let mut rest = bytes.strip_prefix(SIGNATURE)?;
    let mut types = Vec::new();
    while !rest.is_empty() {
        let length = u32::from_be_bytes(rest.get(0..4)?.try_into().ok()?) as usize;
        let kind = rest.get(4..8)?;
        // length + type + data + crc
        rest = rest.get(12 + length..)?;
        types.push(String::from_utf8_lossy(kind).into_owned());
    }
    Some(types)
}
