//! Login and logout handlers

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use crate::middleware::Session;
use crate::server::AppState;
use crate::views::{login_page, LOGIN_ERROR};
use super::found;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn show_login() -> Html<String> {
    Html(login_page(None))
}

pub async fn submit_login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.guard.login(&form.username, &form.password) {
        Ok(token) => {
            let cookie = state.guard.codec().set_cookie(&token);
            let mut response = found("/");
            if let Ok(value) = cookie.parse() {
                response.headers_mut().insert(SET_COOKIE, value);
            }
            response
        }
        Err(_) => (StatusCode::OK, Html(login_page(Some(LOGIN_ERROR)))).into_response(),
    }
}

pub async fn logout(State(state): State<AppState>, mut session: Session) -> Response {
    let cookie = state.guard.logout(&mut session);
    let mut response = found("/login");
    if let Ok(value) = cookie.parse() {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}
