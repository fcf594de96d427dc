//! Error type for the relay path.

use thiserror::Error;

/// Anything that stops a status change from reaching Feishu.
///
/// The web layer collapses every variant into the same generic 500.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request body is not JSON, or a consumed field has the wrong shape.
    #[error("invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// A field needed to build the card is absent.
    #[error("webhook payload is missing `{0}`")]
    MissingField(&'static str),

    /// The outbound POST failed or the bot answered with a non-2xx status.
    #[error("feishu delivery failed: {0}")]
    Delivery(#[from] reqwest::Error),
}
