//! Prompt templates and repo identifier handling.

/// Prefix stripped from full GitHub URLs to get the `owner/name` form.
const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Normalize a repo identifier: a full GitHub URL becomes `owner/name`.
pub fn normalize_repo(repo: &str) -> &str {
    repo.strip_prefix(GITHUB_URL_PREFIX).unwrap_or(repo)
}

/// Cache key for a repo's packed contents.
///
/// Built from the normalized identifier, so URL and short forms of the
/// same repository collide to one entry.
pub fn cache_key(normalized_repo: &str) -> String {
    format!("repomix-{}", normalized_repo)
}

/// Build the completion prompt: persona naming the repo, the packed repo
/// content, then the user's task, joined by fixed connective phrases.
pub fn build_repo_prompt(repo: &str, content: &str, task: &str) -> String {
    format!(
        "You are a helpful software developer assistant that can answer questions and help with tasks related to the Github repo: {repo}.\n\
         Here is the documentation for the repo:\n\
         {content}\n\
         \n\
         Please help me with the following task:\n\
         {task}"
    )
}
