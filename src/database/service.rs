//! Database service layer
//!
//! The console's data-access operations. Every method here assumes the caller
//! already checked the operator session.

use std::sync::Arc;
use tracing::info;
use crate::database::DocumentStore;
use crate::database::repositories::{
    AllowedChatRepository, BlacklistRepository, SettingsRepository, VerifiedUserRepository, ViolationRepository,
};
use crate::models::*;
use crate::utils::errors::{ConsoleError, StoreResult};
use crate::utils::helpers::parse_id;
use crate::utils::logging::log_operator_action;

/// Number of verified users shown on the dashboard
pub const VERIFIED_PAGE_SIZE: usize = 20;

#[derive(Clone)]
pub struct DatabaseService {
    pub verified: VerifiedUserRepository,
    pub violations: ViolationRepository,
    pub blacklist: BlacklistRepository,
    pub chats: AllowedChatRepository,
    pub settings: SettingsRepository,
}

impl DatabaseService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            verified: VerifiedUserRepository::new(store.clone()),
            violations: ViolationRepository::new(store.clone()),
            blacklist: BlacklistRepository::new(store.clone()),
            chats: AllowedChatRepository::new(store.clone()),
            settings: SettingsRepository::new(store),
        }
    }

    /// Most recently verified users, newest first, capped at `limit`
    pub async fn list_verified(&self, limit: usize) -> StoreResult<Vec<VerifiedUser>> {
        self.verified.list_recent(limit).await
    }

    /// Total number of violations. Full collection scan.
    pub async fn count_violations(&self) -> StoreResult<usize> {
        self.violations.count().await
    }

    /// Home page data: the first page of verified users and the violation total
    pub async fn dashboard(&self) -> StoreResult<Dashboard> {
        let (verified, violation_count) =
            tokio::try_join!(self.list_verified(VERIFIED_PAGE_SIZE), self.count_violations())?;

        Ok(Dashboard {
            verified,
            violation_count,
        })
    }

    /// Delete every verified user, returning how many were removed
    pub async fn clear_all_verified(&self) -> StoreResult<usize> {
        log_operator_action("clear_verified", None);
        self.verified.clear_all().await
    }

    /// Delete one verified user; absent ids succeed
    pub async fn delete_verified(&self, doc_id: &str) -> StoreResult<()> {
        log_operator_action("delete_verified", Some(doc_id));
        self.verified.delete(doc_id).await
    }

    /// Blacklist entries, newest first
    pub async fn list_blacklist(&self) -> StoreResult<Vec<BlacklistEntry>> {
        self.blacklist.list().await
    }

    pub async fn delete_blacklist_entry(&self, doc_id: &str) -> StoreResult<()> {
        log_operator_action("delete_blacklist_entry", Some(doc_id));
        self.blacklist.delete(doc_id).await
    }

    pub async fn list_allowed_chats(&self) -> StoreResult<Vec<AllowedChat>> {
        self.chats.list().await
    }

    /// Parse and allow a chat id. Nothing is written when parsing fails.
    pub async fn add_allowed_chat(&self, raw_chat_id: &str) -> Result<AllowedChat, ConsoleError> {
        let chat_id = parse_id(raw_chat_id)?;
        let chat = self.chats.upsert(chat_id).await?;

        log_operator_action("add_allowed_chat", Some(&chat_id.to_string()));
        info!(chat_id = chat_id, "Chat allowed");
        Ok(chat)
    }

    pub async fn remove_allowed_chat(&self, chat_id: &str) -> StoreResult<()> {
        log_operator_action("remove_allowed_chat", Some(chat_id));
        self.chats.delete(chat_id).await
    }

    /// Violation count, verified profile, and blacklist presence for one user id
    pub async fn get_user_detail(&self, raw_user_id: &str) -> Result<UserDetail, ConsoleError> {
        let user_id = parse_id(raw_user_id)?;

        let (violation_count, verified, in_blacklist) = tokio::try_join!(
            self.violations.count_for_user(user_id),
            self.verified.find_by_user_id(user_id),
            self.blacklist.contains_user(user_id),
        )?;

        let user = match verified {
            Some(record) => UserProfile::from_verified(user_id, &record),
            None => UserProfile::placeholder(user_id),
        };

        Ok(UserDetail {
            user,
            violation_count,
            in_blacklist,
        })
    }

    /// Current moderation settings, all off when never saved
    pub async fn get_settings(&self) -> StoreResult<ModerationSettings> {
        self.settings.get().await
    }

    /// Overwrite the moderation settings document
    pub async fn save_settings(&self, settings: &ModerationSettings) -> StoreResult<()> {
        log_operator_action("save_settings", None);
        self.settings.save(settings).await
    }
}
