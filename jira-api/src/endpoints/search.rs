//! # Jira Search Endpoint
//!
//! JQL-based issue search with a bounded page size and an explicit
//! field projection.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::debug;

use crate::client::JiraClient;
use crate::models::SearchResults;

impl JiraClient {
  /// Search issues with a JQL query, returning at most `max_results`
  /// issues with the given field projection.
  pub async fn search_issues(&self, jql: &str, max_results: u32, fields: &[&str]) -> Result<SearchResults> {
    let url = format!("{}/rest/api/3/search", self.base_url);

    debug!(%jql, max_results, "searching Jira issues");

    let max_results_param = max_results.to_string();
    let fields_param = fields.join(",");
    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .query(&[
        ("jql", jql),
        ("maxResults", max_results_param.as_str()),
        ("fields", fields_param.as_str()),
      ])
      .send()
      .await
      .context("Failed to search Jira issues")?;

    match response.status() {
      StatusCode::OK => {
        let results = response
          .json::<SearchResults>()
          .await
          .context("Failed to parse Jira search results")?;
        Ok(results)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Invalid JQL query: {}",
        response.text().await.unwrap_or_default()
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
