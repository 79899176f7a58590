//! The task handler endpoint.
//!
//! `POST /agent` accepts a JSON task (`repo` + `prompt`) and streams a
//! markdown completion back. Input problems terminate early with fixed
//! plain-text guidance; a packing-service failure terminates with a JSON
//! error body; completion failures propagate and abort the response.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::StreamExt;
use uuid::Uuid;

use crate::agent::AgentError;
use crate::repomix::PackError;

use super::routes::AppState;
use super::types::{PackFailureResponse, TaskRequest, WelcomePrompt, WelcomeResponse};

/// Fixed guidance returned for payloads that are not usable JSON.
const GUIDANCE: &str = "please provide a valid JSON object with the following properties: repo, prompt. Repo should be a valid Github repo name. Prompt should be a valid task description.";

/// GET / — welcome descriptor with a ready-to-send example task.
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        welcome: "You are a helpful software developer assistant that can answer questions and help with tasks related to the Github repo."
            .to_string(),
        prompts: vec![WelcomePrompt {
            data: serde_json::json!({
                "repo": "agentuity/cli",
                "prompt": "What is the main function of the repo?",
            })
            .to_string(),
            content_type: "application/json".to_string(),
        }],
    })
}

/// POST /agent — validate the task, resolve repo content, stream the
/// completion as `text/markdown`.
pub async fn handle_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // 1. The payload must be declared as JSON.
    if !is_json(&headers) {
        return GUIDANCE.into_response();
    }

    // 2. Lenient decode, then typed validation with fixed guidance texts.
    let request: TaskRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(_) => return GUIDANCE.into_response(),
    };
    let task = match request.validate() {
        Ok(t) => t,
        Err(e) => return e.guidance().into_response(),
    };

    let request_id = Uuid::new_v4();
    tracing::info!(
        request_id = %request_id,
        repo = %task.repo,
        "Handling agent task"
    );

    // 3. Cache-or-fetch, prompt, streaming completion.
    let stream = match state.agent.run_task(&task).await {
        Ok(stream) => stream,
        Err(AgentError::Pack(PackError::UpstreamStatus(status))) => {
            return Json(PackFailureResponse {
                success: false,
                error: format!("Failed to process repo: {}", status),
            })
            .into_response();
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Agent task failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    // 4. Forward chunks as they arrive. A mid-stream error ends the body
    //    abruptly; nothing is buffered or retried.
    let byte_stream = stream.map(|chunk| chunk.map(Bytes::from));

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/markdown")
        .body(Body::from_stream(byte_stream))
        .unwrap_or_else(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build response".to_string(),
            )
                .into_response()
        })
}

/// Whether the payload is declared as JSON (parameters tolerated).
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().to_ascii_lowercase().starts_with("application/json"))
        .unwrap_or(false)
}
