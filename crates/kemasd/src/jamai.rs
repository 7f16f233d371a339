//! HTTP client for the JamAI Base generative-table service.
//!
//! One call per normalization request, no retries. Timeout is whatever
//! the transport defaults to.

use kemas_common::RowAddRequest;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Remote service answered with a non-success status. The status and
    /// best-effort error body are forwarded to the caller unchanged.
    #[error("remote service returned status {status}")]
    Status { status: u16, body: Value },
    #[error("failed to reach remote service: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for one project's action tables.
pub struct JamaiClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
    project_id: String,
    table_id: String,
}

impl JamaiClient {
    pub fn new(api_url: &str, api_key: &str, project_id: &str, table_id: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            project_id: project_id.to_string(),
            table_id: table_id.to_string(),
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Insert one row and return the raw response payload.
    pub async fn add_row(&self, input_text: &str) -> Result<Value, UpstreamError> {
        let url = format!("{}/api/v1/gen_tables/action/rows/add", self.api_url);
        let request = RowAddRequest::new(&self.table_id, input_text);

        info!("[>]  gen-table call [{}] ({} chars)", self.table_id, input_text.len());

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("X-PROJECT-ID", &self.project_id)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.unwrap_or_else(|_| json!({}));
            error!("[-]  gen-table error {}: {}", status, body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response.json().await?;
        info!("[<]  gen-table response received");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped_from_api_url() {
        let client = JamaiClient::new("http://127.0.0.1:9999/", "key", "proj", "table");
        assert_eq!(client.api_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_table_id_accessor() {
        let client = JamaiClient::new("http://127.0.0.1:9999", "key", "proj", "my_table");
        assert_eq!(client.table_id(), "my_table");
    }
}
