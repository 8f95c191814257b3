use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::auth::TokenProvider;

const API_VERSION: &str = "7.0";

/// Non-success response from the work-item API. Carries enough to diagnose
/// the failure without re-running the request.
#[derive(Debug, Error)]
#[error("API error {status}: {body}")]
pub struct ApiError {
    pub status: u16,
    pub body: String,
}

/// One JSON-Patch operation against a work-item document.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOp {
    pub op: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl PatchOp {
    pub fn replace(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            op: "replace".into(),
            path: path.into(),
            value: Some(value.into()),
        }
    }
}

/// Thin wrapper over the two work-item REST calls. One token fetch per
/// request; no retries.
pub struct WorkItemClient {
    organization: String,
    tokens: Box<dyn TokenProvider>,
    client: reqwest::Client,
}

impl WorkItemClient {
    pub fn new(organization: String, tokens: Box<dyn TokenProvider>) -> Self {
        Self {
            organization,
            tokens,
            client: reqwest::Client::new(),
        }
    }

    fn work_item_url(&self, id: u32) -> String {
        format!(
            "{}/_apis/wit/workitems/{id}?api-version={API_VERSION}",
            self.organization
        )
    }

    pub async fn get_work_item(&self, id: u32) -> Result<Value> {
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .get(self.work_item_url(id))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .with_context(|| format!("GET work item #{id} failed"))?;

        Self::parse_response(response).await
    }

    pub async fn patch_work_item(&self, id: u32, operations: &[PatchOp]) -> Result<Value> {
        let token = self.tokens.access_token().await?;

        let response = self
            .client
            .patch(self.work_item_url(id))
            .header("Authorization", format!("Bearer {token}"))
            .header("Content-Type", "application/json-patch+json")
            .body(serde_json::to_vec(operations)?)
            .send()
            .await
            .with_context(|| format!("PATCH work item #{id} failed"))?;

        Self::parse_response(response).await
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        response
            .json()
            .await
            .context("Failed to parse work item response")
    }
}
