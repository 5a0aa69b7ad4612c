//! Blacklist entry model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use crate::database::document::{Document, FromDocument};
use crate::utils::errors::StoreResult;
use crate::utils::helpers::format_optional_timestamp;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlacklistEntry {
    pub doc_id: String,
    pub user_id: Option<i64>,
    pub added_at: Option<DateTime<FixedOffset>>,
}

impl BlacklistEntry {
    /// `YYYY-MM-DD HH:MM:SS` in the entry's own offset, `-` when absent
    pub fn added_at_label(&self) -> String {
        format_optional_timestamp(self.added_at.as_ref())
    }
}

impl FromDocument for BlacklistEntry {
    fn from_document(document: &Document) -> StoreResult<Self> {
        Ok(Self {
            doc_id: document.id.clone(),
            user_id: document.i64_field("user_id")?,
            added_at: document.timestamp_field("added_at"),
        })
    }
}
