use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{Value, json};

use crate::client::JiraClient;

impl JiraClient {
  /// Add a comment to an issue; `body` is an ADF document
  pub async fn add_comment(&self, issue_key: &str, body: Value) -> Result<()> {
    let url = format!("{}/rest/api/3/issue/{}/comment", self.base_url, issue_key);

    let response = self
      .client
      .post(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .json(&json!({ "body": body }))
      .send()
      .await
      .context("Failed to add Jira comment")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => Ok(()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      StatusCode::NOT_FOUND => Err(anyhow::anyhow!("Issue {} not found", issue_key)),
      StatusCode::BAD_REQUEST => Err(anyhow::anyhow!(
        "Jira rejected the comment: {}",
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
