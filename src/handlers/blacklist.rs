//! Blacklist handlers

use axum::{
    extract::{Path, State},
    response::{Html, Response},
};
use crate::middleware::Session;
use crate::server::AppState;
use crate::views::blacklist_page;
use super::{found, require_operator, WebError};

pub async fn show_blacklist(State(state): State<AppState>, session: Session) -> Result<Html<String>, WebError> {
    require_operator(&state, &session)?;

    let entries = state.db.list_blacklist().await?;
    Ok(Html(blacklist_page(&entries)))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    session: Session,
    Path(doc_id): Path<String>,
) -> Result<Response, WebError> {
    require_operator(&state, &session)?;

    state.db.delete_blacklist_entry(&doc_id).await?;
    Ok(found("/blacklist"))
}
