//! Repomix packing-service client.
//!
//! Repomix flattens a GitHub repository into a single text document. The
//! agent POSTs a multipart form (`url`, `format`, JSON `options`) and reads
//! the `content` field of the JSON response. `RepoPacker` is the seam the
//! handler depends on; `RepomixClient` is the HTTP implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackError {
    /// Packing service replied with a non-success HTTP status.
    #[error("packing service returned status {0}")]
    UpstreamStatus(u16),

    /// Request could not be sent or the response body could not be read.
    #[error("packing request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Packing options sent to Repomix as a JSON-encoded form field.
///
/// Field names follow the Repomix API's camelCase wire format.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackOptions {
    pub remove_comments: bool,
    pub remove_empty_lines: bool,
    pub show_line_numbers: bool,
    pub file_summary: bool,
    pub directory_structure: bool,
    pub output_parsable: bool,
    pub compress: bool,
}

impl Default for PackOptions {
    /// Markdown output with comments and empty lines retained, summary and
    /// directory structure included, no line numbers, no compression.
    fn default() -> Self {
        Self {
            remove_comments: false,
            remove_empty_lines: false,
            show_line_numbers: false,
            file_summary: true,
            directory_structure: true,
            output_parsable: false,
            compress: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackResponse {
    content: String,
}

/// A service that flattens a repository into one text document.
#[async_trait]
pub trait RepoPacker: Send + Sync {
    /// Pack the repository at `repo_url` into markdown text.
    async fn pack(&self, repo_url: &str) -> Result<String, PackError>;
}

/// HTTP client for the Repomix pack endpoint.
pub struct RepomixClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RepomixClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl RepoPacker for RepomixClient {
    async fn pack(&self, repo_url: &str) -> Result<String, PackError> {
        let options = serde_json::to_string(&PackOptions::default())
            .unwrap_or_else(|_| "{}".to_string());

        let form = reqwest::multipart::Form::new()
            .text("url", repo_url.to_string())
            .text("format", "markdown")
            .text("options", options);

        tracing::debug!(url = %repo_url, endpoint = %self.endpoint, "Packing repository");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %repo_url, status = %status, "Packing service returned error");
            return Err(PackError::UpstreamStatus(status.as_u16()));
        }

        let body: PackResponse = response.json().await?;
        Ok(body.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_serialize_to_wire_format() {
        let json = serde_json::to_value(PackOptions::default()).expect("serialize options");
        assert_eq!(
            json,
            serde_json::json!({
                "removeComments": false,
                "removeEmptyLines": false,
                "showLineNumbers": false,
                "fileSummary": true,
                "directoryStructure": true,
                "outputParsable": false,
                "compress": false,
            })
        );
    }

    #[test]
    fn pack_response_parses_content_field() {
        let body: PackResponse =
            serde_json::from_str(r##"{"content": "# Repo\n...", "extra": 1}"##)
                .expect("parse pack response");
        assert_eq!(body.content, "# Repo\n...");
    }

    #[test]
    fn upstream_status_error_carries_code() {
        let err = PackError::UpstreamStatus(500);
        assert_eq!(err.to_string(), "packing service returned status 500");
    }
}
