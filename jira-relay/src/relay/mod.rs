//! Decision logic between an inbound Jira webhook and an outbound card.
//!
//! ## Flow
//!
//! ```text
//! raw body → plan() → Ignored | NoStatusChange | Notify(StatusChange) → to_card()
//! ```
//!
//! Nothing here touches the network; delivery is left to the caller.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::RelayError;
use crate::feishu::{
    Action, ButtonKind, Card, CardConfig, CardHeader, CardMessage, Element, Field, Text,
};
use crate::jira::{ChangelogEnvelope, IssueUpdatedEvent, WebhookEnvelope};

const CARD_TITLE: &str = "Jira 任务状态更新";
const CARD_TEMPLATE: &str = "blue";
const BUTTON_LABEL: &str = "查看Jira任务";

/// What to do with one inbound webhook.
#[derive(Debug)]
pub enum Relay {
    /// Not an issue update.
    Ignored { event: Option<String> },
    /// An issue update that did not touch the status.
    NoStatusChange,
    /// A status transition worth announcing.
    Notify(StatusChange),
}

/// Everything the card shows about one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub issue_key: String,
    pub summary: String,
    pub issue_link: String,
    pub actor: String,
    pub from_status: String,
    pub to_status: String,
}

/// Classify a raw webhook body and extract the transition if there is one.
pub fn plan(body: &[u8]) -> Result<Relay, RelayError> {
    let value: Value = serde_json::from_slice(body)?;

    let envelope = WebhookEnvelope::deserialize(&value)?;
    if !envelope.is_issue_updated() {
        debug!(event = ?envelope.webhook_event, "jira_event_not_issue_update");
        return Ok(Relay::Ignored {
            event: envelope.webhook_event,
        });
    }

    let changelog = ChangelogEnvelope::deserialize(&value)?;
    let Some(item) = changelog.status_change() else {
        return Ok(Relay::NoStatusChange);
    };

    let event = IssueUpdatedEvent::deserialize(&value)?;

    let issue = event.issue.as_ref().ok_or(RelayError::MissingField("issue"))?;
    let issue_key = issue
        .key
        .clone()
        .ok_or(RelayError::MissingField("issue.key"))?;
    let summary = issue
        .summary()
        .ok_or(RelayError::MissingField("issue.fields.summary"))?
        .to_string();
    let issue_link = issue
        .browse_url()
        .ok_or(RelayError::MissingField("issue.self"))?;

    let change = StatusChange {
        issue_key,
        summary,
        issue_link,
        actor: event.actor().to_string(),
        from_status: item.from_value.clone().unwrap_or_default(),
        to_status: item.to_value.clone().unwrap_or_default(),
    };

    info!(
        issue_key = %change.issue_key,
        from_status = %change.from_status,
        to_status = %change.to_status,
        actor = %change.actor,
        "jira_status_change_extracted"
    );

    Ok(Relay::Notify(change))
}

impl StatusChange {
    /// Transition rendered as `` `From` → `To` ``.
    pub fn transition(&self) -> String {
        format!("`{}` → `{}`", self.from_status, self.to_status)
    }

    /// Build the interactive card announcing this transition.
    pub fn to_card(&self) -> CardMessage {
        CardMessage::interactive(Card {
            config: CardConfig {
                wide_screen_mode: true,
            },
            header: CardHeader {
                title: Text::plain(CARD_TITLE),
                template: CARD_TEMPLATE,
            },
            elements: vec![
                Element::Div {
                    text: Some(Text::markdown(format!(
                        "**[{}] {}**",
                        self.issue_key, self.summary
                    ))),
                    fields: None,
                },
                Element::Hr,
                Element::Div {
                    text: None,
                    fields: Some(vec![
                        Field {
                            is_short: true,
                            text: Text::markdown(format!("**操作人**\n{}", self.actor)),
                        },
                        Field {
                            is_short: true,
                            text: Text::markdown(format!("**状态变更**\n{}", self.transition())),
                        },
                    ]),
                },
                Element::Actions {
                    actions: vec![Action::Button {
                        text: Text::plain(BUTTON_LABEL),
                        url: self.issue_link.clone(),
                        kind: ButtonKind::Primary,
                    }],
                },
            ],
        })
    }
}
