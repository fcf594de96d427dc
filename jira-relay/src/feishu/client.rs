//! Outbound delivery to a Feishu custom bot.
//!
//! One POST per notification. No retries: a failure is reported to the caller
//! and the Jira webhook gets a 500.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use url::Url;

use super::card::CardMessage;
use crate::error::RelayError;

/// Reply body of the custom bot endpoint.
///
/// The bot answers HTTP 200 even for rejected messages and reports the
/// problem through `code`.
#[derive(Debug, Default, Deserialize)]
pub struct BotReply {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// Cloneable handle around a pooled HTTP client and the bot address.
#[derive(Debug, Clone)]
pub struct FeishuNotifier {
    client: Client,
    webhook_url: Url,
}

impl FeishuNotifier {
    /// Build a notifier with its own connection pool.
    pub fn new(webhook_url: Url) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, webhook_url))
    }

    pub fn with_client(client: Client, webhook_url: Url) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    /// POST the card once.
    ///
    /// Transport errors and non-2xx statuses are failures. A non-zero `code`
    /// in the reply is only logged.
    pub async fn send(&self, message: &CardMessage) -> Result<(), RelayError> {
        let response = self
            .client
            .post(self.webhook_url.clone())
            .json(message)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();

        // The reply body is informational; an unreadable one is not a failure.
        match response.json::<BotReply>().await {
            Ok(reply) if reply.code != 0 => {
                warn!(
                    status_code = status,
                    feishu_code = reply.code,
                    feishu_msg = %reply.msg,
                    "feishu_reply_nonzero_code"
                );
            }
            Ok(_) => {
                info!(status_code = status, "feishu_notification_sent");
            }
            Err(e) => {
                info!(status_code = status, error = %e, "feishu_reply_unreadable");
            }
        }

        Ok(())
    }
}
