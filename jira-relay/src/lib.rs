//! Jira → Feishu status relay.
//!
//! Receives Jira webhooks, picks out issue status transitions and posts them
//! to a Feishu custom bot as interactive cards.
//!
//! ## Architecture
//!
//! ```text
//! Jira → POST /api/jira → relay::plan() → StatusChange::to_card() → Feishu bot
//! ```

pub mod config;
pub mod error;
pub mod feishu;
pub mod jira;
pub mod relay;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::RelayError;
pub use feishu::{CardMessage, FeishuNotifier};
pub use relay::{plan, Relay, StatusChange};
pub use web::{router, AppState};
