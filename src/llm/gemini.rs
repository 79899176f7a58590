//! Google Gemini streaming client.
//!
//! Uses the `streamGenerateContent` endpoint with `alt=sse`, which emits
//! `data: {...}` lines carrying incremental `GenerateContentResponse`
//! chunks. Text deltas live at `candidates[0].content.parts[*].text`.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;

use super::{CompletionClient, CompletionRequest, CompletionStream, LlmError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn stream_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, LlmError> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "thinkingConfig": {
                    "thinkingBudget": request.thinking_budget,
                }
            }
        });

        tracing::debug!(model = %request.model, "Starting streaming completion");

        let response = self
            .client
            .post(self.stream_url(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus {
                status: status.as_u16(),
                message,
            });
        }

        let mut bytes = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut buf: Vec<u8> = Vec::new();
            loop {
                // Drain complete lines from the buffer before reading more.
                while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    if let Some(text) = extract_sse_text(&line) {
                        if !text.is_empty() {
                            yield Ok(text);
                        }
                    }
                }

                match bytes.next().await {
                    Some(Ok(chunk)) => buf.extend_from_slice(&chunk),
                    Some(Err(e)) => {
                        yield Err(LlmError::Transport(e));
                        return;
                    }
                    None => {
                        // Stream ended; flush any unterminated final line.
                        if let Some(text) = extract_sse_text(&buf) {
                            if !text.is_empty() {
                                yield Ok(text);
                            }
                        }
                        return;
                    }
                }
            }
        };

        Ok(stream.boxed())
    }
}

/// Extract the text delta from one SSE line, if it is a `data:` line
/// carrying a content chunk.
fn extract_sse_text(line: &[u8]) -> Option<String> {
    let line = std::str::from_utf8(line).ok()?.trim();
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    let chunk: serde_json::Value = serde_json::from_str(payload).ok()?;
    let parts = chunk
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_data_line() {
        let line = br#"data: {"candidates":[{"content":{"parts":[{"text":"Hello"}]}}]}"#;
        assert_eq!(extract_sse_text(line).as_deref(), Some("Hello"));
    }

    #[test]
    fn concatenates_multiple_parts() {
        let line =
            br#"data: {"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        assert_eq!(extract_sse_text(line).as_deref(), Some("ab"));
    }

    #[test]
    fn ignores_non_data_lines() {
        assert_eq!(extract_sse_text(b""), None);
        assert_eq!(extract_sse_text(b": keepalive"), None);
        assert_eq!(extract_sse_text(b"event: ping"), None);
    }

    #[test]
    fn ignores_done_marker_and_chunks_without_text() {
        assert_eq!(extract_sse_text(b"data: [DONE]"), None);
        assert_eq!(
            extract_sse_text(br#"data: {"usageMetadata":{"totalTokenCount":12}}"#),
            None
        );
    }

    #[test]
    fn stream_url_includes_model_and_sse_flag() {
        let client = GeminiClient::new("test-key".to_string());
        assert_eq!(
            client.stream_url("gemini-2.5-flash-preview-04-17"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-04-17:streamGenerateContent?alt=sse"
        );
    }
}
