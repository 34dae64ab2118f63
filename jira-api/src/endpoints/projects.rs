use anyhow::{Context, Result};
use reqwest::StatusCode;

use crate::client::JiraClient;
use crate::models::Project;

impl JiraClient {
  /// List all projects visible to the authenticated user
  pub async fn list_projects(&self, expand: &str) -> Result<Vec<Project>> {
    let url = format!("{}/rest/api/3/project", self.base_url);

    let response = self
      .client
      .get(&url)
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
      .query(&[("expand", expand)])
      .send()
      .await
      .context("Failed to list Jira projects")?;

    match response.status() {
      StatusCode::OK => {
        let projects = response
          .json::<Vec<Project>>()
          .await
          .context("Failed to parse Jira project list")?;
        Ok(projects)
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
