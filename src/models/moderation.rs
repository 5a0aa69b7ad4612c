//! Moderation settings model

use serde::{Deserialize, Serialize};
use crate::database::document::{Document, FieldValue, Fields};

/// The bot's moderation switches, stored as one singleton document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationSettings {
    pub night_mode: bool,
    pub block_media: bool,
    pub kick_links: bool,
    pub verify_new_users: bool,
}

impl ModerationSettings {
    pub fn from_document(document: &Document) -> Self {
        Self {
            night_mode: document.flag("night_mode"),
            block_media: document.flag("block_media"),
            kick_links: document.flag("kick_links"),
            verify_new_users: document.flag("verify_new_users"),
        }
    }

    /// All four fields, so a write replaces the whole document
    pub fn to_fields(&self) -> Fields {
        Fields::from([
            ("night_mode".to_string(), FieldValue::Boolean(self.night_mode)),
            ("block_media".to_string(), FieldValue::Boolean(self.block_media)),
            ("kick_links".to_string(), FieldValue::Boolean(self.kick_links)),
            ("verify_new_users".to_string(), FieldValue::Boolean(self.verify_new_users)),
        ])
    }
}
