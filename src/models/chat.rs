//! Allowed chat model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use crate::database::document::{Document, FromDocument};
use crate::utils::errors::{StoreError, StoreResult};
use crate::utils::helpers::format_optional_timestamp;

/// A group chat the bot is permitted to moderate. Stored under its id's decimal form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllowedChat {
    pub chat_id: i64,
    pub added_at: Option<DateTime<FixedOffset>>,
}

impl AllowedChat {
    /// Document id for a chat id
    pub fn document_id(chat_id: i64) -> String {
        chat_id.to_string()
    }

    pub fn added_at_label(&self) -> String {
        format_optional_timestamp(self.added_at.as_ref())
    }
}

impl FromDocument for AllowedChat {
    fn from_document(document: &Document) -> StoreResult<Self> {
        let chat_id = match document.id.parse::<i64>() {
            Ok(id) => id,
            Err(_) => document.i64_field("chat_id")?.ok_or_else(|| {
                StoreError::Decode(format!("allowed chat '{}' has no numeric id", document.id))
            })?,
        };

        Ok(Self {
            chat_id,
            added_at: document.timestamp_field("added_at"),
        })
    }
}
