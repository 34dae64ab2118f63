//! Parameter structs for the Jira tools.
//!
//! Every struct rejects unknown keys so the catalog schemas and the
//! handlers cannot drift apart silently.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTicketParams {
  pub summary: String,
  pub description: String,
  #[serde(default = "default_issue_type")]
  pub issue_type: String,
  /// Defaults to the configured project key when omitted.
  pub project_key: Option<String>,
  #[serde(default = "default_priority")]
  pub priority: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchTicketsParams {
  /// Raw JQL; when present, the discrete filters below are ignored.
  pub jql: Option<String>,
  pub assignee: Option<String>,
  pub status: Option<String>,
  pub project_key: Option<String>,
  #[serde(default = "default_max_results")]
  pub max_results: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GetTicketDetailsParams {
  pub ticket_key: String,
  #[serde(default = "default_true")]
  pub include_comments: bool,
  #[serde(default)]
  pub include_history: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTicketParams {
  pub ticket_key: String,
  pub summary: Option<String>,
  pub description: Option<String>,
  pub assignee: Option<String>,
  pub status: Option<String>,
  pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddCommentParams {
  pub ticket_key: String,
  pub comment: String,
  /// Accepted for contract stability; not currently forwarded to Jira.
  #[serde(default = "default_visibility")]
  pub visibility: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ListProjectsParams {
  #[serde(default = "default_expand")]
  pub expand: String,
}

fn default_issue_type() -> String {
  "Task".to_string()
}

fn default_priority() -> String {
  "Medium".to_string()
}

fn default_max_results() -> u32 {
  20
}

fn default_true() -> bool {
  true
}

fn default_visibility() -> String {
  "public".to_string()
}

fn default_expand() -> String {
  "description,lead".to_string()
}
