//! Streaming LLM completion clients.
//!
//! `CompletionClient` is the seam the agent depends on: one prompt in, a
//! finite forward-only stream of text chunks out. `GeminiClient` talks to
//! the Google Generative Language API.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    /// Request could not be sent or the stream transport failed.
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider replied with a non-success HTTP status before streaming.
    #[error("completion provider returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },
}

/// A single streaming completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,

    /// The full prompt text
    pub prompt: String,

    /// Provider thinking token budget
    pub thinking_budget: u32,
}

/// A finite, non-restartable sequence of generated text chunks.
pub type CompletionStream = BoxStream<'static, Result<String, LlmError>>;

/// A streaming text-completion provider.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Start a completion and return its token stream.
    ///
    /// Errors raised after streaming has begun surface as `Err` items in
    /// the stream; they are not recovered.
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionStream, LlmError>;
}
