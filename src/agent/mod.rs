//! Agent module - the core task-handling logic.
//!
//! The agent resolves packed repository content (cache hit, or pack and
//! cache), builds a prompt around it, and starts a streaming completion.
//! Each task runs as one sequential async chain; concurrent tasks share
//! nothing but the cache collaborator.

mod prompt;

pub use prompt::{build_repo_prompt, cache_key, normalize_repo};

use std::sync::Arc;

use thiserror::Error;

use crate::api::types::Task;
use crate::cache::{KvStore, SetOptions, REPO_CONTENTS_NAMESPACE};
use crate::config::Config;
use crate::llm::{CompletionClient, CompletionRequest, CompletionStream, LlmError};
use crate::repomix::{PackError, RepoPacker};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    Completion(#[from] LlmError),
}

/// Where the packed repo content came from.
///
/// Two concurrent misses for the same repo each fetch upstream; the second
/// write simply overwrites the first. Accepted, not mitigated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoContent {
    /// Served from the cache, no upstream call.
    CacheHit(String),
    /// Fetched from the packing service and written to the cache.
    Fetched(String),
}

impl RepoContent {
    pub fn into_text(self) -> String {
        match self {
            RepoContent::CacheHit(text) | RepoContent::Fetched(text) => text,
        }
    }
}

/// The task-handling agent.
pub struct Agent {
    config: Config,
    kv: Arc<dyn KvStore>,
    packer: Arc<dyn RepoPacker>,
    llm: Arc<dyn CompletionClient>,
}

impl Agent {
    pub fn new(
        config: Config,
        kv: Arc<dyn KvStore>,
        packer: Arc<dyn RepoPacker>,
        llm: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            config,
            kv,
            packer,
            llm,
        }
    }

    /// Resolve the packed content for a task's repo.
    ///
    /// The cache key uses the stripped `owner/name` form; the pack URL
    /// embeds the raw repo field exactly as submitted, so a caller who
    /// sends a full URL gets that URL interpolated verbatim upstream.
    pub async fn resolve_content(&self, task: &Task) -> Result<RepoContent, PackError> {
        let key = cache_key(normalize_repo(&task.repo));

        if let Some(text) = self.kv.get_text(REPO_CONTENTS_NAMESPACE, &key).await {
            tracing::debug!(repo = %task.repo, key = %key, "Repo content cache hit");
            return Ok(RepoContent::CacheHit(text));
        }

        tracing::debug!(repo = %task.repo, key = %key, "Repo content cache miss");
        let repo_url = format!("https://github.com/{}", task.repo);
        let content = self.packer.pack(&repo_url).await?;

        self.kv
            .set(
                REPO_CONTENTS_NAMESPACE,
                &key,
                &content,
                SetOptions {
                    ttl: self.config.cache_ttl,
                    content_type: "text/plain".to_string(),
                },
            )
            .await;

        Ok(RepoContent::Fetched(content))
    }

    /// Run a task: resolve content, build the prompt, start the completion.
    ///
    /// Completion errors are returned or surfaced mid-stream; there is no
    /// retry or fallback anywhere in the chain.
    pub async fn run_task(&self, task: &Task) -> Result<CompletionStream, AgentError> {
        let content = self.resolve_content(task).await?.into_text();
        let prompt = build_repo_prompt(&task.repo, &content, &task.prompt);

        let stream = self
            .llm
            .stream_completion(CompletionRequest {
                model: self.config.model.clone(),
                prompt,
                thinking_budget: self.config.thinking_budget,
            })
            .await?;

        Ok(stream)
    }
}
