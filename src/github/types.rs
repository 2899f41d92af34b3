use serde::{Deserialize, Serialize};

/// Body of `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
    pub draft: bool,
    pub maintainer_can_modify: bool,
}

impl NewPullRequest {
    /// A draft whose body repeats the title
    pub fn draft(title: &str, head: &str, base: &str) -> Self {
        Self {
            title: title.to_string(),
            head: head.to_string(),
            base: base.to_string(),
            body: title.to_string(),
            draft: true,
            maintainer_can_modify: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
    #[serde(default)]
    pub draft: bool,
}

/// Error payload returned by the GitHub REST API
#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
    pub field: Option<String>,
    pub code: Option<String>,
}

impl ApiError {
    pub fn describe(&self) -> String {
        let details: Vec<String> = self
            .errors
            .iter()
            .filter_map(|detail| match (&detail.message, &detail.field, &detail.code) {
                (Some(message), _, _) => Some(message.clone()),
                (None, Some(field), Some(code)) => Some(format!("{} {}", field, code)),
                _ => None,
            })
            .collect();

        if details.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, details.join("; "))
        }
    }
}
