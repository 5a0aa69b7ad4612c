//! Verified users dashboard handlers

use axum::{
    extract::{Path, State},
    response::{Html, Response},
};
use tracing::info;
use crate::middleware::Session;
use crate::server::AppState;
use crate::views::dashboard_page;
use super::{found, require_operator, WebError};

pub async fn home(State(state): State<AppState>, session: Session) -> Result<Html<String>, WebError> {
    require_operator(&state, &session)?;

    let dashboard = state.db.dashboard().await?;
    Ok(Html(dashboard_page(&dashboard)))
}

pub async fn clear_verified(State(state): State<AppState>, session: Session) -> Result<Response, WebError> {
    require_operator(&state, &session)?;

    let deleted = state.db.clear_all_verified().await?;
    info!(deleted = deleted, "Cleared verified users");
    Ok(found("/"))
}

pub async fn delete_verified(
    State(state): State<AppState>,
    session: Session,
    Path(doc_id): Path<String>,
) -> Result<Response, WebError> {
    require_operator(&state, &session)?;

    state.db.delete_verified(&doc_id).await?;
    Ok(found("/"))
}
