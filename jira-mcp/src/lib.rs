//! # Jira MCP Server
//!
//! Model Context Protocol server exposing a fixed set of Jira ticket
//! management tools: create, search, inspect, update, comment, and
//! project listing. Each tool call translates its arguments into one or
//! more Jira Cloud REST calls and renders the result as a single
//! human-readable text block.

pub mod catalog;
pub mod config;
pub mod context;
pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
