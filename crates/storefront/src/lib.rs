//! Kayjih Bloom Haven site library.
//!
//! Public pages, the custom bouquet calculator, WhatsApp order handoff, and
//! review moderation, as a library so the router can be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Assemble the application: `routes` plus health check, static files and
/// sessions.
pub fn app(state: AppState, routes: Router<AppState>) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes)
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
