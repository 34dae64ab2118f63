//! # Jira API Client
//!
//! Provides Jira Cloud REST API integration for ticket management,
//! covering issue creation, JQL search, field updates, transitions,
//! comments, user lookup, and project listings.

mod client;
mod consts;
pub mod document;
mod endpoints;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
// Re-export models
pub use models::{
  Comment, CommentPage, CreatedIssue, Issue, IssueFields, JiraAuth, NamedField, Project, SearchResults, Transition,
  TransitionId, TransitionRequest, Transitions, User,
};
