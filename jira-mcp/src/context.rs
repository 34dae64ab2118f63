//! Shared server context available to all tool handlers.

use anyhow::{Context, Result};
use jira_api::JiraClient;

use crate::config::Config;

/// Shared context available to all tool handlers.
///
/// Built once at startup and immutable afterwards; handlers hold no
/// state of their own.
pub struct ServerContext {
  pub config: Config,
  pub jira: JiraClient,
}

impl ServerContext {
  /// Construct the context from validated configuration.
  pub fn new(config: Config) -> Result<Self> {
    let jira = jira_api::create_jira_client(&config.base_url, &config.email, &config.api_token, config.timeout)
      .context("Failed to construct Jira client")?;

    Ok(Self { config, jira })
  }

  /// Browse URL for a ticket or project key.
  pub fn browse_url(&self, key: &str) -> String {
    self.config.browse_url(key)
  }
}
