use thiserror::Error;

#[derive(Error, Debug)]
pub enum DraftPrError {
    #[error("A pull request title is required")]
    MissingTitle,

    #[error("A branch name is required")]
    MissingBranch,

    #[error("Export your GitHub token first: {0}=...")]
    MissingToken(&'static str),

    #[error("Remote '{0}' has no URL configured")]
    RemoteNotFound(String),

    #[error("Cannot determine owner/repo from remote URL '{0}'")]
    RemoteUrl(String),

    #[error("`git {command}` failed ({status})")]
    GitCommand { command: String, status: String },

    #[error("Git operation failed: {0}")]
    Repository(#[from] git2::Error),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DraftPrError>;
