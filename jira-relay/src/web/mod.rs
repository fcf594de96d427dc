//! Web server module: routes and handlers for the Jira webhook.
//!
//! Each request is handled inline. There is no queue between Jira and
//! Feishu, so Jira's response reflects whether the card was delivered.

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{health, jira_webhook, method_not_allowed, AppState, HealthResponse};

/// Path Jira is configured to call.
pub const JIRA_WEBHOOK_PATH: &str = "/api/jira";

/// Build the application router.
///
/// Jira payloads carry full issue bodies, so the webhook route accepts any
/// body size.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            JIRA_WEBHOOK_PATH,
            post(jira_webhook)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::disable()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
