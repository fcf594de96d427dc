//! HTTP endpoint handlers.
//!
//! The Jira handler runs the whole relay inline:
//! 1. Classify the payload and extract the status change
//! 2. POST the card to Feishu once
//! 3. Answer Jira with a plain-text status line

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::RelayError;
use crate::feishu::FeishuNotifier;
use crate::relay::{plan, Relay};

pub const EVENT_IGNORED: &str = "Event ignored: Not an issue update.";
pub const NO_STATUS_CHANGE: &str = "No status change detected.";
pub const NOTIFICATION_SENT: &str = "Notification sent to Feishu successfully.";
pub const INTERNAL_ERROR: &str = "Internal Server Error";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub notifier: FeishuNotifier,
}

impl AppState {
    pub fn new(notifier: FeishuNotifier) -> Self {
        Self { notifier }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Jira Webhook
// =============================================================================

/// Jira webhook endpoint.
///
/// The body is taken as raw bytes, and a body that cannot be read is
/// answered here, so every failure lands on the same 500 path instead of
/// an extractor rejection.
pub async fn jira_webhook(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!(
                error = %rejection,
                rejected_status = rejection.status().as_u16(),
                "jira_webhook_body_unreadable"
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
        }
    };

    info!(body_length = body.len(), "jira_webhook_received");

    match relay_event(&state, &body).await {
        Ok(reply) => (StatusCode::OK, reply),
        Err(e) => {
            error!(error = %e, "jira_webhook_failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
        }
    }
}

async fn relay_event(state: &AppState, body: &[u8]) -> Result<&'static str, RelayError> {
    let change = match plan(body)? {
        Relay::Ignored { event } => {
            info!(event = ?event, "jira_event_ignored");
            return Ok(EVENT_IGNORED);
        }
        Relay::NoStatusChange => {
            info!("jira_no_status_change");
            return Ok(NO_STATUS_CHANGE);
        }
        Relay::Notify(change) => change,
    };

    state.notifier.send(&change.to_card()).await?;

    info!(
        issue_key = %change.issue_key,
        to_status = %change.to_status,
        "jira_status_change_relayed"
    );

    Ok(NOTIFICATION_SENT)
}

/// Fallback for any method other than POST on the webhook route.
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    info!(method = %method, "jira_webhook_method_rejected");
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
