//! Static catalog of the tools this server exposes.
//!
//! Each descriptor's input schema must declare exactly the parameter
//! keys its handler accepts; the tests in `tools` hold the two sides
//! together.

use serde_json::json;

use crate::protocol::Tool;

/// Get all available tools
pub fn get_tools() -> Vec<Tool> {
  vec![
    Tool {
      name: "create_ticket".to_string(),
      description: "Create a new Jira ticket".to_string(),
      input_schema: json!({
          "type": "object",
          "properties": {
              "summary": {
                  "type": "string",
                  "description": "Ticket summary/title"
              },
              "description": {
                  "type": "string",
                  "description": "Detailed description of the ticket"
              },
              "issueType": {
                  "type": "string",
                  "description": "Issue type name (default: Task)"
              },
              "projectKey": {
                  "type": "string",
                  "description": "Project key (defaults to the configured project)"
              },
              "priority": {
                  "type": "string",
                  "description": "Priority name (default: Medium)"
              }
          },
          "required": ["summary", "description"]
      }),
    },
    Tool {
      name: "search_tickets".to_string(),
      description: "Search Jira tickets with JQL or simple filters".to_string(),
      input_schema: json!({
          "type": "object",
          "properties": {
              "jql": {
                  "type": "string",
                  "description": "Raw JQL query; when set, the other filters are ignored"
              },
              "assignee": {
                  "type": "string",
                  "description": "Filter by assignee"
              },
              "status": {
                  "type": "string",
                  "description": "Filter by status name"
              },
              "projectKey": {
                  "type": "string",
                  "description": "Filter by project key"
              },
              "maxResults": {
                  "type": "integer",
                  "description": "Maximum number of results to return (default: 20)"
              }
          },
          "required": []
      }),
    },
    Tool {
      name: "get_ticket_details".to_string(),
      description: "Get detailed information about a specific ticket".to_string(),
      input_schema: json!({
          "type": "object",
          "properties": {
              "ticketKey": {
                  "type": "string",
                  "description": "Ticket key (e.g. \"PROJ-123\")"
              },
              "includeComments": {
                  "type": "boolean",
                  "description": "Include recent comments (default: true)"
              },
              "includeHistory": {
                  "type": "boolean",
                  "description": "Request change history (default: false)"
              }
          },
          "required": ["ticketKey"]
      }),
    },
    Tool {
      name: "update_ticket".to_string(),
      description: "Update fields, assignee, or status of an existing ticket (best effort)".to_string(),
      input_schema: json!({
          "type": "object",
          "properties": {
              "ticketKey": {
                  "type": "string",
                  "description": "Ticket key (e.g. \"PROJ-123\")"
              },
              "summary": {
                  "type": "string",
                  "description": "New summary"
              },
              "description": {
                  "type": "string",
                  "description": "New description"
              },
              "assignee": {
                  "type": "string",
                  "description": "Assignee email or display name"
              },
              "status": {
                  "type": "string",
                  "description": "Target status name, matched against available transitions"
              },
              "priority": {
                  "type": "string",
                  "description": "New priority name"
              }
          },
          "required": ["ticketKey"]
      }),
    },
    Tool {
      name: "add_comment".to_string(),
      description: "Add a comment to a ticket".to_string(),
      input_schema: json!({
          "type": "object",
          "properties": {
              "ticketKey": {
                  "type": "string",
                  "description": "Ticket key (e.g. \"PROJ-123\")"
              },
              "comment": {
                  "type": "string",
                  "description": "Comment text"
              },
              "visibility": {
                  "type": "string",
                  "description": "Comment visibility (default: public; accepted but not yet applied remotely)"
              }
          },
          "required": ["ticketKey", "comment"]
      }),
    },
    Tool {
      name: "list_projects".to_string(),
      description: "List all Jira projects visible to the configured account".to_string(),
      input_schema: json!({
          "type": "object",
          "properties": {
              "expand": {
                  "type": "string",
                  "description": "Comma-separated expand directives (default: \"description,lead\")"
              }
          },
          "required": []
      }),
    },
  ]
}
