//! Allowed chat handlers

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::debug;
use crate::middleware::Session;
use crate::server::AppState;
use crate::utils::errors::ConsoleError;
use crate::views::{groups_page, CHAT_ID_ERROR};
use super::{found, require_operator, WebError};

#[derive(Debug, Deserialize)]
pub struct AddChatForm {
    #[serde(default)]
    pub chat_id: String,
}

pub async fn show_groups(State(state): State<AppState>, session: Session) -> Result<Html<String>, WebError> {
    require_operator(&state, &session)?;

    let chats = state.db.list_allowed_chats().await?;
    Ok(Html(groups_page(&chats, None)))
}

pub async fn add_group(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddChatForm>,
) -> Result<Response, WebError> {
    require_operator(&state, &session)?;

    match state.db.add_allowed_chat(&form.chat_id).await {
        Ok(_) => Ok(found("/groups")),
        Err(ConsoleError::Validation(e)) => {
            debug!(error = %e, "Rejected chat id");
            let chats = state.db.list_allowed_chats().await?;
            Ok(Html(groups_page(&chats, Some(CHAT_ID_ERROR))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_group(
    State(state): State<AppState>,
    session: Session,
    Path(chat_id): Path<String>,
) -> Result<Response, WebError> {
    require_operator(&state, &session)?;

    state.db.remove_allowed_chat(&chat_id).await?;
    Ok(found("/groups"))
}
