//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations,
//! including fetching, creating, and updating Jira issues.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::client::JiraClient;
use crate::models::{CreatedIssue, Issue};

impl JiraClient {
  /// Create a new issue from a prepared fields payload
  pub async fn create_issue(&self, fields: Value) -> Result<CreatedIssue> {
    let url = format!("{}/rest/api/3/issue", self.base_url);

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&json!({ "fields": fields }))
      .send()
      .await
      .context("Failed to create Jira issue")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        let created = response
          .json::<CreatedIssue>()
          .await
          .context("Failed to parse Jira issue creation response")?;
        Ok(created)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the issue: {}",
        response.text().await.unwrap_or_default()
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Get a Jira issue by key with a field projection and optional expand
  pub async fn get_issue(&self, issue_key: &str, fields: &[&str], expand: Option<&str>) -> Result<Issue> {
    let url = format!("{}/rest/api/3/issue/{}", self.base_url, issue_key);

    let mut request = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .query(&[("fields", fields.join(","))]);
    if let Some(expand) = expand {
      request = request.query(&[("expand", expand)]);
    }

    let response = request.send().await.context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => {
        let issue = response.json::<Issue>().await.context("Failed to parse Jira issue")?;
        Ok(issue)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }

  /// Update issue fields from a prepared payload
  pub async fn update_issue(&self, issue_key: &str, fields: Value) -> Result<()> {
    let url = format!("{}/rest/api/3/issue/{}", self.base_url, issue_key);

    let response = self
      .client
      .put(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&json!({ "fields": fields }))
      .send()
      .await
      .context("Failed to update Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the update: {}",
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
