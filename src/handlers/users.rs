//! User lookup handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use crate::middleware::Session;
use crate::server::AppState;
use crate::utils::errors::ConsoleError;
use crate::views::{user_error_page, user_page};
use super::{require_operator, WebError};

pub async fn user_details(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<String>,
) -> Result<Response, WebError> {
    require_operator(&state, &session)?;

    match state.db.get_user_detail(&user_id).await {
        Ok(detail) => Ok(Html(user_page(&detail)).into_response()),
        Err(ConsoleError::Validation(e)) => {
            Ok((StatusCode::BAD_REQUEST, Html(user_error_page(&format!("❌ {}", e)))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
