//! Tool dispatch and the six Jira tool handlers.
//!
//! Handlers translate validated arguments into Jira REST calls and
//! render a single text block. They let errors bubble; `call_tool` is
//! the one boundary that converts any failure into a uniform
//! error-shaped result, so a caller never sees an unhandled error.

pub mod params;

use anyhow::{Context, Result};
use jira_api::document;
use jira_api::models::{IssueFields, NamedField, User};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::context::ServerContext;
use crate::protocol::{CallToolParams, CallToolResult};
use crate::tools::params::{
  AddCommentParams, CreateTicketParams, GetTicketDetailsParams, ListProjectsParams, SearchTicketsParams,
  UpdateTicketParams,
};

/// Field projection used by `search_tickets`.
const SEARCH_FIELDS: &[&str] = &[
  "summary",
  "status",
  "assignee",
  "created",
  "updated",
  "priority",
  "issuetype",
];

/// Field projection always requested by `get_ticket_details`.
const DETAIL_FIELDS: &[&str] = &[
  "summary",
  "description",
  "status",
  "assignee",
  "creator",
  "created",
  "updated",
  "priority",
  "issuetype",
  "project",
];

/// Execute a tool call.
///
/// Unknown names and handler failures both come back as error-shaped
/// results; this function never returns an `Err` and never panics.
pub async fn call_tool(ctx: &ServerContext, params: CallToolParams) -> CallToolResult {
  let name = params.name.as_str();
  let args = params.arguments.unwrap_or_else(|| json!({}));

  debug!(tool = name, "dispatching tool call");

  let outcome = match name {
    "create_ticket" => Some(create_ticket(ctx, args).await),
    "search_tickets" => Some(search_tickets(ctx, args).await),
    "get_ticket_details" => Some(get_ticket_details(ctx, args).await),
    "update_ticket" => Some(update_ticket(ctx, args).await),
    "add_comment" => Some(add_comment(ctx, args).await),
    "list_projects" => Some(list_projects(ctx, args).await),
    _ => None,
  };

  match outcome {
    None => {
      warn!(tool = name, "unknown tool requested");
      CallToolResult::error(format!("Unknown tool: {name}"))
    }
    Some(Ok(text)) => CallToolResult::text(text),
    Some(Err(e)) => {
      warn!(tool = name, error = %e, "tool call failed");
      CallToolResult::error(format!("Error executing {name}: {e:#}"))
    }
  }
}

async fn create_ticket(ctx: &ServerContext, args: Value) -> Result<String> {
  let p: CreateTicketParams = serde_json::from_value(args).context("Invalid arguments")?;

  let project_key = p
    .project_key
    .unwrap_or_else(|| ctx.config.default_project_key.clone());

  // Jira itself validates the project reference; an unknown key comes
  // back as a remote error with its message intact.
  let fields = json!({
      "project": { "key": project_key },
      "summary": p.summary,
      "description": document::text_document(&p.description),
      "issuetype": { "name": p.issue_type },
      "priority": { "name": p.priority }
  });

  let created = ctx.jira.create_issue(fields).await?;

  Ok(format!(
    "Created ticket {} (id {})\n\nView it at {}",
    created.key,
    created.id,
    ctx.browse_url(&created.key)
  ))
}

async fn search_tickets(ctx: &ServerContext, args: Value) -> Result<String> {
  let p: SearchTicketsParams = serde_json::from_value(args).context("Invalid arguments")?;

  // A raw JQL query wins outright; otherwise AND together whichever
  // filters are present, falling back to the default project so a
  // zero-argument call is never an unscoped search.
  let jql = match p.jql {
    Some(jql) => jql,
    None => {
      let mut clauses = Vec::new();
      if let Some(ref assignee) = p.assignee {
        clauses.push(format!("assignee = \"{assignee}\""));
      }
      if let Some(ref status) = p.status {
        clauses.push(format!("status = \"{status}\""));
      }
      if let Some(ref project_key) = p.project_key {
        clauses.push(format!("project = \"{project_key}\""));
      }
      if clauses.is_empty() {
        format!("project = \"{}\"", ctx.config.default_project_key)
      } else {
        clauses.join(" AND ")
      }
    }
  };

  let results = ctx.jira.search_issues(&jql, p.max_results, SEARCH_FIELDS).await?;

  let mut out = format!(
    "Found {} ticket(s) (showing {}) for query: {}\n",
    results.total,
    results.issues.len(),
    jql
  );
  for issue in &results.issues {
    let f = &issue.fields;
    out.push_str(&format!(
      "\n{}: {}\n  Status: {} | Assignee: {} | Priority: {} | Type: {}\n  Created: {} | Updated: {}\n",
      issue.key,
      f.summary,
      named(f.status.as_ref(), "Unknown"),
      assignee_name(f.assignee.as_ref()),
      named(f.priority.as_ref(), "None"),
      named(f.issue_type.as_ref(), "Unknown"),
      date(f.created.as_deref()),
      date(f.updated.as_deref()),
    ));
  }

  Ok(out)
}

async fn get_ticket_details(ctx: &ServerContext, args: Value) -> Result<String> {
  let p: GetTicketDetailsParams = serde_json::from_value(args).context("Invalid arguments")?;

  let mut fields = DETAIL_FIELDS.to_vec();
  if p.include_comments {
    fields.push("comment");
  }
  // The changelog is requested but not rendered; callers that want it
  // get it at the API level only.
  let expand = p.include_history.then_some("changelog");

  let issue = ctx.jira.get_issue(&p.ticket_key, &fields, expand).await?;
  let f = &issue.fields;

  let mut out = format!("{}: {}\n\n", issue.key, f.summary);
  out.push_str(&format!("Status: {}\n", named(f.status.as_ref(), "Unknown")));
  out.push_str(&format!("Type: {}\n", named(f.issue_type.as_ref(), "Unknown")));
  out.push_str(&format!("Priority: {}\n", named(f.priority.as_ref(), "None")));
  out.push_str(&format!("Assignee: {}\n", assignee_name(f.assignee.as_ref())));
  out.push_str(&format!(
    "Reporter: {}\n",
    f.creator.as_ref().map(|u| u.display_name.as_str()).unwrap_or("Unknown")
  ));
  out.push_str(&format!("Created: {}\n", date(f.created.as_deref())));
  out.push_str(&format!("Updated: {}\n", date(f.updated.as_deref())));

  out.push_str("\nDescription:\n");
  out.push_str(&description_text(f));
  out.push('\n');

  if p.include_comments
    && let Some(page) = &f.comment
    && !page.comments.is_empty()
  {
    out.push_str("\nRecent Comments:\n");
    let recent = page.comments.iter().rev().take(3).collect::<Vec<_>>();
    for comment in recent.into_iter().rev() {
      let author = comment
        .author
        .as_ref()
        .map(|u| u.display_name.as_str())
        .unwrap_or("Unknown");
      let body = comment
        .body
        .as_ref()
        .and_then(document::plain_text)
        .unwrap_or_else(|| "(no text)".to_string());
      out.push_str(&format!("[{}] {}: {}\n", date(Some(&comment.created)), author, body));
    }
  }

  out.push_str(&format!("\nView it at {}", ctx.browse_url(&issue.key)));
  Ok(out)
}

async fn update_ticket(ctx: &ServerContext, args: Value) -> Result<String> {
  let p: UpdateTicketParams = serde_json::from_value(args).context("Invalid arguments")?;

  let mut notes: Vec<String> = Vec::new();

  // Step 1: plain field updates go out in a single call. A failure
  // here is fatal; everything after it is best effort.
  let mut fields = serde_json::Map::new();
  if let Some(ref summary) = p.summary {
    fields.insert("summary".to_string(), json!(summary));
    notes.push("Summary updated".to_string());
  }
  if let Some(ref desc) = p.description {
    fields.insert("description".to_string(), document::text_document(desc));
    notes.push("Description updated".to_string());
  }
  if let Some(ref priority) = p.priority {
    fields.insert("priority".to_string(), json!({ "name": priority }));
    notes.push(format!("Priority set to {priority}"));
  }
  if !fields.is_empty() {
    ctx.jira.update_issue(&p.ticket_key, Value::Object(fields)).await?;
  }

  // Step 2: assignee resolution never fails the call.
  if let Some(ref assignee) = p.assignee {
    match ctx.jira.search_users(assignee).await {
      Ok(users) => match users.first() {
        Some(user) => {
          let account = user.account_id.as_deref().unwrap_or("unknown account id");
          notes.push(format!("Assignee resolved to {} ({account})", user.display_name));
        }
        None => notes.push(format!(
          "Warning: no user found matching \"{assignee}\"; assignee unchanged"
        )),
      },
      Err(e) => notes.push(format!("Warning: assignee lookup for \"{assignee}\" failed: {e}")),
    }
  }

  // Step 3: status changes go through the transition whose target
  // status matches, case-insensitively. No match, no call.
  if let Some(ref status) = p.status {
    match ctx.jira.get_transitions(&p.ticket_key).await {
      Ok(transitions) => {
        let matched = transitions
          .iter()
          .find(|t| t.to.as_ref().is_some_and(|to| to.name.eq_ignore_ascii_case(status)));
        match matched {
          Some(transition) => match ctx.jira.transition_issue(&p.ticket_key, &transition.id).await {
            Ok(()) => {
              let target = transition
                .to
                .as_ref()
                .map(|to| to.name.as_str())
                .unwrap_or(transition.name.as_str());
              notes.push(format!("Status changed to {target}"));
            }
            Err(e) => notes.push(format!("Warning: transition to \"{status}\" failed: {e}")),
          },
          None => {
            let available = transitions
              .iter()
              .filter_map(|t| t.to.as_ref().map(|to| to.name.as_str()))
              .collect::<Vec<_>>()
              .join(", ");
            notes.push(format!(
              "Warning: no transition to status \"{status}\" is available (available: {available})"
            ));
          }
        }
      }
      Err(e) => notes.push(format!("Warning: could not fetch transitions for \"{status}\": {e}")),
    }
  }

  if notes.is_empty() {
    notes.push("No changes requested".to_string());
  }

  let mut out = format!("Updated ticket {}:\n", p.ticket_key);
  for note in &notes {
    out.push_str(&format!("\n- {note}"));
  }
  out.push_str(&format!("\n\nView it at {}", ctx.browse_url(&p.ticket_key)));
  Ok(out)
}

async fn add_comment(ctx: &ServerContext, args: Value) -> Result<String> {
  let p: AddCommentParams = serde_json::from_value(args).context("Invalid arguments")?;

  // `visibility` is accepted for contract stability but not forwarded;
  // Jira visibility restrictions are not wired up yet.
  debug!(visibility = %p.visibility, "add_comment visibility accepted but not applied");

  ctx
    .jira
    .add_comment(&p.ticket_key, document::text_document(&p.comment))
    .await?;

  Ok(format!(
    "Comment added to {}\n\nView it at {}",
    p.ticket_key,
    ctx.browse_url(&p.ticket_key)
  ))
}

async fn list_projects(ctx: &ServerContext, args: Value) -> Result<String> {
  let p: ListProjectsParams = serde_json::from_value(args).context("Invalid arguments")?;

  let projects = ctx.jira.list_projects(&p.expand).await?;

  let mut out = format!("Found {} project(s):\n", projects.len());
  for project in &projects {
    let lead = project
      .lead
      .as_ref()
      .map(|u| u.display_name.as_str())
      .unwrap_or("No lead assigned");
    let description = project.description.as_deref().unwrap_or("No description");
    out.push_str(&format!(
      "\n{}: {}{}\n  Lead: {}\n  {}\n  {}\n",
      project.key,
      project.name,
      project
        .project_type
        .as_ref()
        .map(|t| format!(" ({t})"))
        .unwrap_or_default(),
      lead,
      description,
      ctx.browse_url(&project.key),
    ));
  }

  Ok(out)
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn named(field: Option<&NamedField>, fallback: &str) -> String {
  field.map(|f| f.name.clone()).unwrap_or_else(|| fallback.to_string())
}

fn assignee_name(user: Option<&User>) -> String {
  user
    .map(|u| u.display_name.clone())
    .unwrap_or_else(|| "Unassigned".to_string())
}

fn description_text(fields: &IssueFields) -> String {
  fields
    .description
    .as_ref()
    .and_then(document::plain_text)
    .unwrap_or_else(|| "No description".to_string())
}

/// Render a Jira timestamp as a calendar date, passing unparseable
/// values through unchanged.
fn date(raw: Option<&str>) -> String {
  let Some(raw) = raw else {
    return "Unknown".to_string();
  };
  chrono::DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z")
    .or_else(|_| chrono::DateTime::parse_from_rfc3339(raw))
    .map(|d| d.format("%Y-%m-%d").to_string())
    .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{body_json, body_partial_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::catalog;
  use crate::context::test_support::test_context;

  fn call(name: &str, arguments: Option<Value>) -> CallToolParams {
    CallToolParams {
      name: name.to_string(),
      arguments,
    }
  }

  fn result_text(result: &CallToolResult) -> &str {
    let crate::protocol::ToolContent::Text { text } = &result.content[0];
    text
  }

  /// Parse arguments with the same struct the named handler uses.
  fn try_parse(name: &str, args: Value) -> Result<(), serde_json::Error> {
    match name {
      "create_ticket" => serde_json::from_value::<CreateTicketParams>(args).map(drop),
      "search_tickets" => serde_json::from_value::<SearchTicketsParams>(args).map(drop),
      "get_ticket_details" => serde_json::from_value::<GetTicketDetailsParams>(args).map(drop),
      "update_ticket" => serde_json::from_value::<UpdateTicketParams>(args).map(drop),
      "add_comment" => serde_json::from_value::<AddCommentParams>(args).map(drop),
      "list_projects" => serde_json::from_value::<ListProjectsParams>(args).map(drop),
      other => unreachable!("no handler for {other}"),
    }
  }

  #[tokio::test]
  async fn test_unknown_tool_is_error_result() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    let result = call_tool(&ctx, call("no_such_tool", None)).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).contains("Unknown tool: no_such_tool"));
  }

  #[tokio::test]
  async fn test_every_catalog_tool_dispatches() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    // Empty args are invalid for most tools, but the failure must be a
    // handler error, never an unknown-tool error.
    for tool in catalog::get_tools() {
      let result = call_tool(&ctx, call(&tool.name, Some(json!({})))).await;
      assert!(
        !result_text(&result).contains("Unknown tool"),
        "tool {} did not dispatch",
        tool.name
      );
    }
  }

  #[test]
  fn test_handlers_accept_exactly_the_catalog_keys() {
    for tool in catalog::get_tools() {
      let properties = tool.input_schema["properties"].as_object().unwrap();

      // Args built from every declared property must parse.
      let mut args = serde_json::Map::new();
      for (key, schema) in properties {
        let value = match schema["type"].as_str().unwrap() {
          "string" => json!("PROJ-1"),
          "integer" | "number" => json!(1),
          "boolean" => json!(true),
          other => unreachable!("unsupported schema type {other}"),
        };
        args.insert(key.clone(), value);
      }
      assert!(
        try_parse(&tool.name, Value::Object(args.clone())).is_ok(),
        "tool {} rejects its own declared parameters",
        tool.name
      );

      // An undeclared key must be rejected.
      args.insert("bogus_extra_key".to_string(), json!(true));
      assert!(
        try_parse(&tool.name, Value::Object(args)).is_err(),
        "tool {} accepts keys its schema does not declare",
        tool.name
      );
    }
  }

  #[tokio::test]
  async fn test_handler_failure_is_wrapped_by_dispatcher() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    // Missing required summary: the serde failure surfaces through the
    // dispatcher's uniform wrapper.
    let result = call_tool(&ctx, call("create_ticket", Some(json!({ "description": "d" })))).await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).starts_with("Error executing create_ticket:"));
  }

  #[tokio::test]
  async fn test_create_ticket_success() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/api/3/issue"))
      .and(body_partial_json(json!({
          "fields": {
              "summary": "Fix login bug",
              "issuetype": { "name": "Bug" },
              "priority": { "name": "High" },
              "project": { "key": "DEV" }
          }
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({
          "id": "10001",
          "key": "DEV-123"
      })))
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "create_ticket",
        Some(json!({
            "summary": "Fix login bug",
            "description": "desc",
            "issueType": "Bug",
            "priority": "High"
        })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    assert!(text.contains("DEV-123"));
    assert!(text.contains("/browse/DEV-123"));
  }

  #[tokio::test]
  async fn test_search_without_arguments_scopes_to_default_project() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("jql", "project = \"DEV\""))
      .and(query_param("maxResults", "20"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "total": 0,
          "issues": []
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = call_tool(&ctx, call("search_tickets", None)).await;

    assert_eq!(result.is_error, Some(false));
    assert!(result_text(&result).contains("project = \"DEV\""));
  }

  #[tokio::test]
  async fn test_search_raw_jql_ignores_discrete_filters() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("jql", "status = Done"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "total": 0,
          "issues": []
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "search_tickets",
        Some(json!({ "jql": "status = Done", "assignee": "x" })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    assert!(!result_text(&result).contains("assignee"));
  }

  #[tokio::test]
  async fn test_search_combines_present_filters() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/search"))
      .and(query_param("jql", "assignee = \"jane\" AND status = \"In Progress\""))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "total": 30,
          "issues": [
              {
                  "key": "DEV-7",
                  "fields": {
                      "summary": "Speed up CI",
                      "status": { "name": "In Progress" },
                      "assignee": { "displayName": "Jane Doe" },
                      "priority": { "name": "Medium" },
                      "issuetype": { "name": "Task" },
                      "created": "2024-01-15T10:30:00.000+0000",
                      "updated": "2024-01-16T08:00:00.000+0000"
                  }
              }
          ]
      })))
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "search_tickets",
        Some(json!({ "assignee": "jane", "status": "In Progress" })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    // Remote total is echoed even though only one issue came back.
    assert!(text.contains("Found 30 ticket(s) (showing 1)"));
    assert!(text.contains("DEV-7: Speed up CI"));
    assert!(text.contains("Assignee: Jane Doe"));
    assert!(text.contains("Created: 2024-01-15"));
  }

  #[tokio::test]
  async fn test_get_ticket_details_without_comments() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/issue/DEV-1"))
      .and(query_param(
        "fields",
        "summary,description,status,assignee,creator,created,updated,priority,issuetype,project",
      ))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "key": "DEV-1",
          "fields": {
              "summary": "Fix login bug",
              "description": jira_api::document::text_document("Users cannot log in"),
              "status": { "name": "In Progress" },
              "issuetype": { "name": "Bug" },
              "priority": { "name": "High" },
              "creator": { "displayName": "John Smith" },
              "created": "2024-01-15T10:30:00.000+0000",
              "updated": "2024-01-16T08:00:00.000+0000"
          }
      })))
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "get_ticket_details",
        Some(json!({ "ticketKey": "DEV-1", "includeComments": false })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    assert!(text.contains("DEV-1: Fix login bug"));
    assert!(text.contains("Users cannot log in"));
    assert!(text.contains("Assignee: Unassigned"));
    assert!(!text.contains("Recent Comments"));
  }

  #[tokio::test]
  async fn test_get_ticket_details_shows_three_most_recent_comments() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    let comment = |text: &str, day: u8| {
      json!({
          "author": { "displayName": "Jane Doe" },
          "created": format!("2024-01-{day:02}T09:00:00.000+0000"),
          "body": jira_api::document::text_document(text)
      })
    };

    Mock::given(method("GET"))
      .and(path("/rest/api/3/issue/DEV-2"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "key": "DEV-2",
          "fields": {
              "summary": "Chatty ticket",
              "status": { "name": "Open" },
              "comment": {
                  "comments": [
                      comment("oldest", 10),
                      comment("second", 11),
                      comment("third", 12),
                      comment("newest", 13)
                  ]
              }
          }
      })))
      .mount(&mock_server)
      .await;

    let result = call_tool(&ctx, call("get_ticket_details", Some(json!({ "ticketKey": "DEV-2" })))).await;

    let text = result_text(&result);
    assert!(text.contains("Recent Comments"));
    assert!(!text.contains("oldest"));
    assert!(text.contains("second"));
    assert!(text.contains("third"));
    assert!(text.contains("newest"));
    assert!(text.contains("[2024-01-13] Jane Doe: newest"));
  }

  #[tokio::test]
  async fn test_update_ticket_unresolvable_assignee_is_warning_not_error() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/user/search"))
      .and(query_param("query", "ghost@example.com"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "update_ticket",
        Some(json!({ "ticketKey": "DEV-1", "assignee": "ghost@example.com" })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    assert!(text.contains("Warning"));
    assert!(text.contains("ghost@example.com"));
  }

  #[tokio::test]
  async fn test_update_ticket_unmatched_status_issues_no_transition() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/issue/DEV-1/transitions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "transitions": [
              { "id": "11", "name": "To Do", "to": { "name": "To Do" } },
              { "id": "21", "name": "Start Progress", "to": { "name": "In Progress" } }
          ]
      })))
      .mount(&mock_server)
      .await;

    // Any POST would violate this zero-call expectation.
    Mock::given(method("POST"))
      .and(path("/rest/api/3/issue/DEV-1/transitions"))
      .respond_with(ResponseTemplate::new(204))
      .expect(0)
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call("update_ticket", Some(json!({ "ticketKey": "DEV-1", "status": "Done" }))),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    assert!(text.contains("Warning"));
    assert!(text.contains("\"Done\""));
    assert!(text.contains("To Do, In Progress"));
  }

  #[tokio::test]
  async fn test_update_ticket_applies_fields_and_matching_transition() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("PUT"))
      .and(path("/rest/api/3/issue/DEV-1"))
      .and(body_partial_json(json!({
          "fields": {
              "summary": "Better summary",
              "priority": { "name": "High" }
          }
      })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    Mock::given(method("GET"))
      .and(path("/rest/api/3/issue/DEV-1/transitions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "transitions": [
              { "id": "31", "name": "Finish", "to": { "name": "Done" } }
          ]
      })))
      .mount(&mock_server)
      .await;

    // Status matching is case-insensitive against the target status.
    Mock::given(method("POST"))
      .and(path("/rest/api/3/issue/DEV-1/transitions"))
      .and(body_json(json!({ "transition": { "id": "31" } })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "update_ticket",
        Some(json!({
            "ticketKey": "DEV-1",
            "summary": "Better summary",
            "priority": "High",
            "status": "done"
        })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    assert!(text.contains("- Summary updated"));
    assert!(text.contains("- Priority set to High"));
    assert!(text.contains("- Status changed to Done"));
    assert!(text.contains("/browse/DEV-1"));
  }

  #[tokio::test]
  async fn test_update_ticket_field_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("PUT"))
      .and(path("/rest/api/3/issue/DEV-1"))
      .respond_with(ResponseTemplate::new(400).set_body_json(json!({
          "errorMessages": [],
          "errors": { "priority": "Priority name 'Extreme' is not valid" }
      })))
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "update_ticket",
        Some(json!({ "ticketKey": "DEV-1", "priority": "Extreme" })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(true));
    assert!(result_text(&result).starts_with("Error executing update_ticket:"));
  }

  #[tokio::test]
  async fn test_add_comment_round_trips_text() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/api/3/issue/DEV-1/comment"))
      .and(body_json(json!({
          "body": jira_api::document::text_document("Deployed to staging")
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "10200" })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let result = call_tool(
      &ctx,
      call(
        "add_comment",
        Some(json!({ "ticketKey": "DEV-1", "comment": "Deployed to staging" })),
      ),
    )
    .await;

    assert_eq!(result.is_error, Some(false));
    assert!(result_text(&result).contains("/browse/DEV-1"));
  }

  #[tokio::test]
  async fn test_list_projects_fills_missing_fields() {
    let mock_server = MockServer::start().await;
    let ctx = test_context(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/3/project"))
      .and(query_param("expand", "description,lead"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([
          {
              "key": "DEV",
              "name": "Development",
              "projectTypeKey": "software",
              "description": "Main project",
              "lead": { "displayName": "Jane Doe" }
          },
          {
              "key": "OPS",
              "name": "Operations"
          }
      ])))
      .mount(&mock_server)
      .await;

    let result = call_tool(&ctx, call("list_projects", None)).await;

    assert_eq!(result.is_error, Some(false));
    let text = result_text(&result);
    assert!(text.contains("Found 2 project(s)"));
    assert!(text.contains("DEV: Development (software)"));
    assert!(text.contains("Lead: Jane Doe"));
    assert!(text.contains("Lead: No lead assigned"));
    assert!(text.contains("No description"));
  }

  #[test]
  fn test_date_formatting() {
    assert_eq!(date(Some("2024-01-15T10:30:00.000+0000")), "2024-01-15");
    assert_eq!(date(Some("2024-01-15T10:30:00Z")), "2024-01-15");
    assert_eq!(date(Some("not a date")), "not a date");
    assert_eq!(date(None), "Unknown");
  }
}
