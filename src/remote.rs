// Remote URL handling

use crate::errors::{DraftPrError, Result};
use regex::Regex;

/// Owner and name of a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    /// Parse the owner/repo out of a GitHub remote URL
    ///
    /// Supports https (`https://github.com/owner/repo.git`), scp-like ssh
    /// (`git@github.com:owner/repo.git`) and `ssh://git@github.com/owner/repo.git`.
    pub fn parse(url: &str) -> Result<Self> {
        let re = Regex::new(
            r"^(?:https://github\.com/|git@github\.com:|ssh://git@github\.com/)(?P<owner>[^/\s]+)/(?P<name>[^/\s]+?)(?:\.git)?/?$",
        )
        .map_err(|_| DraftPrError::RemoteUrl(url.to_string()))?;

        let caps = re
            .captures(url.trim())
            .ok_or_else(|| DraftPrError::RemoteUrl(url.to_string()))?;

        let owner = caps["owner"].to_string();
        let name = caps["name"].to_string();
        if name.is_empty() || name == ".git" {
            return Err(DraftPrError::RemoteUrl(url.to_string()));
        }

        log::debug!("Remote {} resolved to {}/{}", url, owner, name);
        Ok(Self { owner, name })
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
