//! Process configuration loaded once at startup.
//!
//! All four required settings come from the environment and are
//! validated before the server accepts its first request, so a missing
//! credential fails here with a message naming the variable instead of
//! surfacing later as an opaque 401 from Jira.

use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Environment variable storing the Jira site base URL.
pub const ENV_JIRA_BASE_URL: &str = "JIRA_BASE_URL";
/// Environment variable storing the Jira account email.
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";
/// Environment variable storing the Jira API token.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Environment variable storing the default project key.
pub const ENV_JIRA_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";
/// Environment variable overriding the HTTP request timeout in seconds.
pub const ENV_JIRA_TIMEOUT_SECS: &str = "JIRA_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable process-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
  /// Jira site base URL with no trailing slash, e.g. `https://acme.atlassian.net`.
  pub base_url: String,
  /// Account email used for HTTP basic auth.
  pub email: String,
  /// API token used for HTTP basic auth.
  pub api_token: String,
  /// Project key used when a tool call names none.
  pub default_project_key: String,
  /// Timeout applied to every Jira request.
  pub timeout: Duration,
}

impl Config {
  /// Load configuration from the process environment.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Load configuration through a lookup function, for tests.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let base_url = require(&lookup, ENV_JIRA_BASE_URL)?;
    let base_url = ensure_url_scheme(&base_url)?;
    let email = require(&lookup, ENV_JIRA_EMAIL)?;
    let api_token = require(&lookup, ENV_JIRA_API_TOKEN)?;
    let default_project_key = require(&lookup, ENV_JIRA_PROJECT_KEY)?;

    let timeout_secs = match lookup(ENV_JIRA_TIMEOUT_SECS) {
      Some(raw) => raw
        .parse::<u64>()
        .with_context(|| format!("'{ENV_JIRA_TIMEOUT_SECS}' must be a number of seconds, got '{raw}'"))?,
      None => DEFAULT_TIMEOUT_SECS,
    };

    Ok(Self {
      base_url,
      email,
      api_token,
      default_project_key,
      timeout: Duration::from_secs(timeout_secs),
    })
  }

  /// Browse URL for a ticket or project key.
  pub fn browse_url(&self, key: &str) -> String {
    format!("{}/browse/{}", self.base_url, key)
  }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
  F: Fn(&str) -> Option<String>,
{
  match lookup(key) {
    Some(value) if !value.trim().is_empty() => Ok(value),
    _ => Err(anyhow::anyhow!("Required environment variable '{key}' is not set")),
  }
}

/// Validate the base URL and normalize it: assume https:// when no
/// scheme is given, and strip any trailing slash.
fn ensure_url_scheme(raw: &str) -> Result<String> {
  let candidate = if raw.starts_with("http://") || raw.starts_with("https://") {
    raw.to_string()
  } else {
    format!("https://{raw}")
  };

  let url = Url::parse(&candidate).with_context(|| format!("'{ENV_JIRA_BASE_URL}' is not a valid URL: {raw}"))?;

  Ok(url.as_str().trim_end_matches('/').to_string())
}
