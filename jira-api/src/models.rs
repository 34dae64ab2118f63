use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Identifiers assigned by Jira when an issue is created
#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
  pub id: String,
  pub key: String,
}

/// One page of JQL search results
#[derive(Debug, Deserialize)]
pub struct SearchResults {
  /// Total matches reported by Jira, which may exceed the number of
  /// issues actually returned in this page.
  pub total: u64,
  pub issues: Vec<Issue>,
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct Issue {
  pub key: String,
  pub fields: IssueFields,
}

/// Represents Jira issue fields
///
/// Only the fields the adapter projects are modeled; everything here is
/// optional except the summary because search projections vary per call.
#[derive(Debug, Deserialize)]
pub struct IssueFields {
  pub summary: String,
  /// Atlassian Document Format in API v3; see [`crate::document`].
  #[serde(default)]
  pub description: Option<Value>,
  #[serde(default)]
  pub status: Option<NamedField>,
  #[serde(default)]
  pub assignee: Option<User>,
  #[serde(default)]
  pub creator: Option<User>,
  #[serde(default)]
  pub priority: Option<NamedField>,
  #[serde(default, rename = "issuetype")]
  pub issue_type: Option<NamedField>,
  #[serde(default)]
  pub created: Option<String>,
  #[serde(default)]
  pub updated: Option<String>,
  #[serde(default)]
  pub comment: Option<CommentPage>,
}

/// A Jira entity referenced only by display name (status, priority,
/// issue type, transition target)
#[derive(Debug, Deserialize)]
pub struct NamedField {
  pub name: String,
}

/// Represents a Jira user
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  #[serde(default)]
  pub account_id: Option<String>,
  pub display_name: String,
  #[serde(default)]
  pub email_address: Option<String>,
}

/// Comments attached to an issue, oldest first
#[derive(Debug, Deserialize)]
pub struct CommentPage {
  pub comments: Vec<Comment>,
}

/// A single issue comment
#[derive(Debug, Deserialize)]
pub struct Comment {
  #[serde(default)]
  pub author: Option<User>,
  pub created: String,
  /// Atlassian Document Format body.
  #[serde(default)]
  pub body: Option<Value>,
}

/// Represents a Jira transition
#[derive(Debug, Deserialize)]
pub struct Transition {
  pub id: String,
  pub name: String,
  /// Status the issue lands in when this transition executes.
  #[serde(default)]
  pub to: Option<NamedField>,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct Transitions {
  pub transitions: Vec<Transition>,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Represents a Jira project
#[derive(Debug, Deserialize)]
pub struct Project {
  pub key: String,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub lead: Option<User>,
  #[serde(default, rename = "projectTypeKey")]
  pub project_type: Option<String>,
}
