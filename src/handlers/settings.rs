//! Moderation settings handlers

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use crate::middleware::Session;
use crate::models::ModerationSettings;
use crate::server::AppState;
use crate::views::settings_page;
use super::{require_operator, WebError};

/// Checkbox form: unchecked boxes are simply absent from the body
#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    pub night_mode: Option<String>,
    pub block_media: Option<String>,
    pub kick_links: Option<String>,
    pub verify_new_users: Option<String>,
}

fn checked(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.is_empty())
}

impl From<&SettingsForm> for ModerationSettings {
    fn from(form: &SettingsForm) -> Self {
        Self {
            night_mode: checked(&form.night_mode),
            block_media: checked(&form.block_media),
            kick_links: checked(&form.kick_links),
            verify_new_users: checked(&form.verify_new_users),
        }
    }
}

pub async fn show_settings(State(state): State<AppState>, session: Session) -> Result<Html<String>, WebError> {
    require_operator(&state, &session)?;

    let settings = state.db.get_settings().await?;
    Ok(Html(settings_page(&settings, false)))
}

pub async fn save_settings(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Html<String>, WebError> {
    require_operator(&state, &session)?;

    state.db.save_settings(&ModerationSettings::from(&form)).await?;
    let settings = state.db.get_settings().await?;
    Ok(Html(settings_page(&settings, true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_boxes_are_off() {
        let form = SettingsForm {
            night_mode: Some("on".to_string()),
            ..Default::default()
        };
        assert_eq!(
            ModerationSettings::from(&form),
            ModerationSettings {
                night_mode: true,
                block_media: false,
                kick_links: false,
                verify_new_users: false,
            }
        );
    }

    #[test]
    fn test_empty_value_is_off() {
        let form = SettingsForm {
            kick_links: Some(String::new()),
            ..Default::default()
        };
        assert!(!ModerationSettings::from(&form).kick_links);
    }
}
