use crate::errors::{DraftPrError, Result};
use crate::github::types::{ApiError, NewPullRequest, PullRequest};
use crate::remote::RepoSlug;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const API_URL_ENV: &str = "GITHUB_API_URL";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

const API_VERSION: &str = "2022-11-28";

pub trait GitHubApi {
    fn create_pull_request(&self, repo: &RepoSlug, pull: &NewPullRequest) -> Result<PullRequest>;
}

impl<T: GitHubApi + ?Sized> GitHubApi for &T {
    fn create_pull_request(&self, repo: &RepoSlug, pull: &NewPullRequest) -> Result<PullRequest> {
        (**self).create_pull_request(repo, pull)
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let client = Client::builder()
            .user_agent(concat!("git-draft-pr/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Honour `GITHUB_API_URL` for GitHub Enterprise installs
    pub fn from_env(token: &str) -> Result<Self> {
        let base_url = api_url_from(std::env::var(API_URL_ENV).ok());
        Self::new(token, &base_url)
    }
}

/// Pick the API root, falling back to github.com when unset or blank
pub fn api_url_from(value: Option<String>) -> String {
    match value.map(|url| url.trim().to_string()) {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_API_URL.to_string(),
    }
}

impl GitHubApi for GitHubClient {
    fn create_pull_request(&self, repo: &RepoSlug, pull: &NewPullRequest) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/{}/pulls", self.base_url, repo.owner, repo.name);
        log::info!("Creating PR on {}: {} → {} (\"{}\")", repo, pull.head, pull.base, pull.title);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(pull)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(error) => error.describe(),
                Err(_) => body,
            };
            log::error!("GitHub rejected the pull request: {} {}", status, message);
            return Err(DraftPrError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: PullRequest = serde_json::from_str(&body)?;
        log::debug!("Created pull request #{} (draft: {})", created.number, created.draft);
        Ok(created)
    }
}

#[cfg(test)]
pub struct MockGitHubApi {
    pub response: std::result::Result<PullRequest, (u16, String)>,
    pub created_prs: std::sync::Mutex<Vec<(RepoSlug, NewPullRequest)>>,
}

#[cfg(test)]
impl MockGitHubApi {
    pub fn new(html_url: &str) -> Self {
        Self {
            response: Ok(PullRequest {
                number: 1,
                html_url: html_url.to_string(),
                draft: true,
            }),
            created_prs: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            response: Err((status, message.to_string())),
            created_prs: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn get_created_prs(&self) -> Vec<(RepoSlug, NewPullRequest)> {
        self.created_prs.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl GitHubApi for MockGitHubApi {
    fn create_pull_request(&self, repo: &RepoSlug, pull: &NewPullRequest) -> Result<PullRequest> {
        self.created_prs
            .lock()
            .unwrap()
            .push((repo.clone(), pull.clone()));

        match &self.response {
            Ok(created) => Ok(created.clone()),
            Err((status, message)) => Err(DraftPrError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
