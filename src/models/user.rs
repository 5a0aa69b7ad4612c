//! Verified user and user detail models

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use crate::database::document::{Document, FromDocument};
use crate::utils::errors::StoreResult;
use crate::utils::helpers::MISSING;

/// A user who passed the bot's verification challenge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifiedUser {
    /// Store-assigned document id
    pub doc_id: String,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub username: String,
    pub verified_at: Option<DateTime<FixedOffset>>,
}

impl VerifiedUser {
    /// Verification time as stored, or the missing marker
    pub fn verified_at_label(&self) -> String {
        self.verified_at
            .map(|t| t.to_string())
            .unwrap_or_else(|| MISSING.to_string())
    }
}

impl FromDocument for VerifiedUser {
    fn from_document(document: &Document) -> StoreResult<Self> {
        Ok(Self {
            doc_id: document.id.clone(),
            user_id: document.i64_field("user_id")?,
            first_name: document.string_field("first_name").unwrap_or_default(),
            username: document.string_field("username").unwrap_or_default(),
            verified_at: document.timestamp_field("verified_at"),
        })
    }
}

/// Name fields shown on the user detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub first_name: String,
    pub username: String,
}

impl UserProfile {
    /// Stand-in profile for users the bot never verified
    pub fn placeholder(user_id: i64) -> Self {
        Self {
            user_id,
            first_name: MISSING.to_string(),
            username: MISSING.to_string(),
        }
    }

    pub fn from_verified(user_id: i64, user: &VerifiedUser) -> Self {
        let or_missing = |s: &str| if s.is_empty() { MISSING.to_string() } else { s.to_string() };
        Self {
            user_id,
            first_name: or_missing(&user.first_name),
            username: or_missing(&user.username),
        }
    }
}

/// Everything the console knows about one user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDetail {
    pub user: UserProfile,
    pub violation_count: usize,
    pub in_blacklist: bool,
}

/// Home page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub verified: Vec<VerifiedUser>,
    pub violation_count: usize,
}
