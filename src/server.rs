//! HTTP server assembly
//!
//! Builds the router over shared application state and runs it until a
//! shutdown signal arrives.

use axum::{
    body::Body,
    extract::FromRef,
    http::Request,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span};
use crate::config::Settings;
use crate::database::DatabaseService;
use crate::handlers::{assets, auth, blacklist, dashboard, groups, settings, users};
use crate::middleware::SessionGuard;
use crate::utils::errors::Result;
use crate::utils::helpers::generate_uuid;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub guard: SessionGuard,
}

impl AppState {
    pub fn new(db: DatabaseService, guard: SessionGuard) -> Self {
        Self { db, guard }
    }
}

impl FromRef<AppState> for SessionGuard {
    fn from_ref(state: &AppState) -> Self {
        state.guard.clone()
    }
}

/// Build the console router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::home))
        .route("/login", get(auth::show_login).post(auth::submit_login))
        .route("/logout", get(auth::logout))
        .route("/clear", post(dashboard::clear_verified))
        .route("/delete/:doc_id", post(dashboard::delete_verified))
        .route("/blacklist", get(blacklist::show_blacklist))
        .route("/blacklist/delete/:doc_id", post(blacklist::delete_entry))
        .route("/groups", get(groups::show_groups))
        .route("/groups/add", post(groups::add_group))
        .route("/groups/delete/:chat_id", post(groups::delete_group))
        .route("/user/:user_id", get(users::user_details))
        .route("/settings", get(settings::show_settings).post(settings::save_settings))
        .route("/favicon.ico", get(assets::favicon))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            info_span!(
                "request",
                request_id = %generate_uuid(),
                method = %request.method(),
                path = %request.uri().path(),
            )
        }))
        .with_state(state)
}

/// Bind the listener and serve until Ctrl+C or SIGTERM
pub async fn serve(settings: &Settings, state: AppState) -> Result<()> {
    let address = settings.bind_address();
    info!("Binding to {}", address);

    let listener = TcpListener::bind(&address).await?;
    info!("GhostShield console listening on {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
