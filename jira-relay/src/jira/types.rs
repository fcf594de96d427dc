//! Jira webhook payload types.
//!
//! Only the fields the relay consumes are modelled. Everything is optional
//! or defaulted because Jira omits parts of the payload depending on the
//! event, and absence must lead to an early exit rather than a decode error.

use serde::Deserialize;

/// Value of `webhookEvent` for issue updates.
pub const ISSUE_UPDATED_EVENT: &str = "jira:issue_updated";

/// Actor shown on the card when the payload carries no user.
pub const UNKNOWN_ACTOR: &str = "未知用户";

/// Path marker separating the site root from the REST API in `issue.self`.
const REST_API_MARKER: &str = "/rest/api/";

// =============================================================================
// Envelope
// =============================================================================

/// The discriminant every Jira webhook carries.
///
/// Decoded on its own so unrelated events are ignored no matter what the
/// rest of their body looks like.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookEnvelope {
    #[serde(default, rename = "webhookEvent")]
    pub webhook_event: Option<String>,
}

impl WebhookEnvelope {
    pub fn is_issue_updated(&self) -> bool {
        self.webhook_event.as_deref() == Some(ISSUE_UPDATED_EVENT)
    }
}

// =============================================================================
// jira:issue_updated
// =============================================================================

/// The changelog of a `jira:issue_updated` webhook.
///
/// Decoded before the issue and user so an update without a status
/// transition exits early whatever shape the rest of the body has.
#[derive(Debug, Default, Deserialize)]
pub struct ChangelogEnvelope {
    #[serde(default)]
    pub changelog: Option<Changelog>,
}

impl ChangelogEnvelope {
    /// First changelog entry touching the `status` field, if any.
    ///
    /// A missing changelog and a changelog without a status entry are the
    /// same thing here.
    pub fn status_change(&self) -> Option<&ChangelogItem> {
        self.changelog
            .as_ref()?
            .items
            .iter()
            .find(|item| item.is_status())
    }
}

/// Issue and actor of a `jira:issue_updated` webhook.
#[derive(Debug, Default, Deserialize)]
pub struct IssueUpdatedEvent {
    #[serde(default)]
    pub issue: Option<Issue>,
    #[serde(default)]
    pub user: Option<JiraUser>,
}

impl IssueUpdatedEvent {
    /// Display name of whoever triggered the event, or the placeholder.
    pub fn actor(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.display_name.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_ACTOR)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Changelog {
    #[serde(default)]
    pub items: Vec<ChangelogItem>,
}

/// A single field transition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangelogItem {
    #[serde(default)]
    pub field: Option<String>,
    /// Human readable value before the change
    #[serde(default, rename = "fromString")]
    pub from_value: Option<String>,
    /// Human readable value after the change
    #[serde(default, rename = "toString")]
    pub to_value: Option<String>,
}

impl ChangelogItem {
    pub fn is_status(&self) -> bool {
        self.field
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("status"))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub key: Option<String>,
    /// REST URL of the issue itself
    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
    #[serde(default)]
    pub fields: Option<IssueFields>,
}

impl Issue {
    /// Browser link for the issue, built from the site root of `self`.
    ///
    /// Without the REST marker the whole `self` URL is used as the root.
    pub fn browse_url(&self) -> Option<String> {
        let key = self.key.as_deref()?;
        let self_url = self.self_url.as_deref()?;
        Some(browse_url(self_url, key))
    }

    pub fn summary(&self) -> Option<&str> {
        self.fields.as_ref()?.summary.as_deref()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JiraUser {
    #[serde(default, rename = "displayName")]
    pub display_name: Option<String>,
}

/// `https://site/rest/api/2/issue/1` + `KEY` → `https://site/browse/KEY`.
pub fn browse_url(self_url: &str, key: &str) -> String {
    let root = self_url
        .split_once(REST_API_MARKER)
        .map_or(self_url, |(root, _)| root);
    format!("{root}/browse/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
                "webhookEvent": "jira:issue_updated",
                "user": {"displayName": "Alice", "accountId": "abc"},
                "issue": {
                    "id": "10001",
                    "key": "PROJ-1",
                    "self": "https://x.atlassian.net/rest/api/2/issue/10001",
                    "fields": {"summary": "Fix bug", "priority": {"name": "High"}}
                },
                "changelog": {
                    "id": "42",
                    "items": [
                        {"field": "assignee", "fromString": null, "toString": "Bob"},
                        {"field": "Status", "fromString": "To Do", "toString": "In Progress"}
                    ]
                }
            }"#;

    fn sample_event() -> IssueUpdatedEvent {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_envelope_filters_event_type() {
        let updated: WebhookEnvelope =
            serde_json::from_str(r#"{"webhookEvent": "jira:issue_updated"}"#).unwrap();
        assert!(updated.is_issue_updated());

        let created: WebhookEnvelope =
            serde_json::from_str(r#"{"webhookEvent": "jira:issue_created", "issue": 7}"#).unwrap();
        assert!(!created.is_issue_updated());

        let missing: WebhookEnvelope = serde_json::from_str("{}").unwrap();
        assert!(!missing.is_issue_updated());
    }

    #[test]
    fn test_status_change_is_case_insensitive() {
        let envelope: ChangelogEnvelope = serde_json::from_str(SAMPLE).unwrap();
        let item = envelope.status_change().unwrap();
        assert_eq!(item.from_value.as_deref(), Some("To Do"));
        assert_eq!(item.to_value.as_deref(), Some("In Progress"));
    }

    #[test]
    fn test_status_change_absent() {
        let no_changelog = ChangelogEnvelope::default();
        assert!(no_changelog.status_change().is_none());

        let other_fields: ChangelogEnvelope = serde_json::from_str(
            r#"{"changelog": {"items": [{"field": "summary", "fromString": "a", "toString": "b"}]}}"#,
        )
        .unwrap();
        assert!(other_fields.status_change().is_none());
    }

    #[test]
    fn test_actor_defaults_to_placeholder() {
        assert_eq!(sample_event().actor(), "Alice");
        assert_eq!(IssueUpdatedEvent::default().actor(), UNKNOWN_ACTOR);

        let blank: IssueUpdatedEvent =
            serde_json::from_str(r#"{"user": {"displayName": ""}}"#).unwrap();
        assert_eq!(blank.actor(), UNKNOWN_ACTOR);
    }

    #[test]
    fn test_browse_url() {
        let event = sample_event();
        let issue = event.issue.as_ref().unwrap();
        assert_eq!(
            issue.browse_url().as_deref(),
            Some("https://x.atlassian.net/browse/PROJ-1")
        );
        assert_eq!(issue.summary(), Some("Fix bug"));
    }

    #[test]
    fn test_browse_url_without_marker_keeps_whole_url() {
        assert_eq!(
            browse_url("https://jira.internal/issue/7", "OPS-7"),
            "https://jira.internal/issue/7/browse/OPS-7"
        );
    }

    #[test]
    fn test_browse_url_splits_at_first_marker() {
        assert_eq!(
            browse_url("https://host/jira/rest/api/2/rest/api/3", "A-1"),
            "https://host/jira/browse/A-1"
        );
    }
}
