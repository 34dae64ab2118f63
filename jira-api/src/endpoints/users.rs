use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::client::JiraClient;
use crate::models::User;

impl JiraClient {
  /// Search the user directory by email or display name
  pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
    let url = format!("{}/rest/api/3/user/search", self.base_url);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .query(&[("query", query)])
      .send()
      .await
      .context("Failed to search Jira users")?;

    match response.status() {
      StatusCode::OK => {
        let users = response
          .json::<Vec<User>>()
          .await
          .context("Failed to parse Jira user search results")?;
        Ok(users)
      }
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(anyhow::anyhow!(
        "Authentication failed. Please check your Jira credentials."
      )),
      _ => Err(anyhow::anyhow!(
        "Unexpected error: HTTP {} - {}",
        response.status(),
        response.text().await.unwrap_or_default()
      )),
    }
  }
}
