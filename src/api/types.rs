//! API request and response types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw task payload as submitted by the caller (lenient decode).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskRequest {
    /// Repo identifier: `owner/name` or a full GitHub URL
    #[serde(default)]
    pub repo: Option<String>,

    /// The task description / user prompt
    #[serde(default)]
    pub prompt: Option<String>,
}

/// A validated task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub repo: String,
    pub prompt: String,
}

/// Task payload validation failure, carrying the offending field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl ValidationError {
    /// The fixed guidance text returned to the caller.
    pub fn guidance(&self) -> &'static str {
        match self {
            ValidationError::MissingField("repo") => "please provide a repo",
            ValidationError::MissingField(_) => "please provide a prompt",
        }
    }
}

impl TaskRequest {
    /// Validate the payload. Empty strings count as missing, and `repo`
    /// is checked before `prompt`.
    pub fn validate(self) -> Result<Task, ValidationError> {
        let repo = self
            .repo
            .filter(|r| !r.is_empty())
            .ok_or(ValidationError::MissingField("repo"))?;
        let prompt = self
            .prompt
            .filter(|p| !p.is_empty())
            .ok_or(ValidationError::MissingField("prompt"))?;
        Ok(Task { repo, prompt })
    }
}

/// JSON body returned when the packing service fails.
#[derive(Debug, Clone, Serialize)]
pub struct PackFailureResponse {
    pub success: bool,
    pub error: String,
}

/// Welcome descriptor served at the API root.
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    /// Short description of what the agent does
    pub welcome: String,

    /// Example payloads a client can submit as-is
    pub prompts: Vec<WelcomePrompt>,
}

/// One example payload in the welcome descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct WelcomePrompt {
    /// JSON-encoded example task
    pub data: String,

    /// Content type the example should be submitted with
    #[serde(rename = "contentType")]
    pub content_type: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_complete_task() {
        let req = TaskRequest {
            repo: Some("foo/bar".to_string()),
            prompt: Some("explain".to_string()),
        };
        assert_eq!(
            req.validate().expect("valid task"),
            Task {
                repo: "foo/bar".to_string(),
                prompt: "explain".to_string(),
            }
        );
    }

    #[test]
    fn validate_rejects_missing_or_empty_repo() {
        for req in [
            TaskRequest {
                repo: None,
                prompt: Some("explain".to_string()),
            },
            TaskRequest {
                repo: Some(String::new()),
                prompt: Some("explain".to_string()),
            },
        ] {
            let err = req.validate().expect_err("repo should be rejected");
            assert_eq!(err, ValidationError::MissingField("repo"));
            assert_eq!(err.guidance(), "please provide a repo");
        }
    }

    #[test]
    fn validate_rejects_missing_prompt_after_repo() {
        let req = TaskRequest {
            repo: Some("foo/bar".to_string()),
            prompt: None,
        };
        let err = req.validate().expect_err("prompt should be rejected");
        assert_eq!(err, ValidationError::MissingField("prompt"));
        assert_eq!(err.guidance(), "please provide a prompt");
    }

    #[test]
    fn missing_repo_reported_before_missing_prompt() {
        let err = TaskRequest::default()
            .validate()
            .expect_err("empty payload should be rejected");
        assert_eq!(err, ValidationError::MissingField("repo"));
    }

    #[test]
    fn task_request_tolerates_unknown_fields() {
        let req: TaskRequest =
            serde_json::from_str(r#"{"repo": "a/b", "prompt": "x", "extra": 42}"#)
                .expect("lenient decode");
        assert_eq!(req.repo.as_deref(), Some("a/b"));
        assert_eq!(req.prompt.as_deref(), Some("x"));
    }
}
