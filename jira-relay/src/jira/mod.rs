//! Inbound side: the subset of the Jira webhook schema the relay reads.

pub mod types;

pub use types::{
    browse_url, Changelog, ChangelogEnvelope, ChangelogItem, Issue, IssueFields, IssueUpdatedEvent, JiraUser,
    WebhookEnvelope, ISSUE_UPDATED_EVENT, UNKNOWN_ACTOR,
};
