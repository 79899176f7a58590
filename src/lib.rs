//! # Repo Agent
//!
//! A small HTTP agent that answers questions about a GitHub repository.
//!
//! This library provides:
//! - An HTTP API accepting a JSON task (`repo` + `prompt`)
//! - A cache-or-fetch layer for packed repository contents (Repomix)
//! - A streaming Gemini completion returned to the caller as markdown
//!
//! ## Request flow
//!
//! 1. Validate the incoming JSON task
//! 2. Resolve the packed repo content (cache hit, or pack and cache)
//! 3. Build a prompt embedding the repo content and the user's task
//! 4. Stream the model completion back chunk-by-chunk
//!
//! ## Example
//!
//! ```rust,ignore
//! use repo_agent::{api, config::Config};
//!
//! let config = Config::from_env()?;
//! api::serve(config).await?;
//! ```

pub mod agent;
pub mod api;
pub mod cache;
pub mod config;
pub mod llm;
pub mod repomix;

pub use config::Config;
