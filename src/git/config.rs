use super::GitCli;
use crate::errors::Result;

pub const DEFAULT_BASE: &str = "develop";
pub const DEFAULT_REMOTE: &str = "origin";

/// Settings stored under the `draft-pr` section of git config
///
/// ```text
/// [draft-pr]
///     base = main
///     remote = upstream
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPrConfig {
    pub base: Option<String>,
    pub remote: String,
}

impl Default for DraftPrConfig {
    fn default() -> Self {
        Self {
            base: None,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

impl DraftPrConfig {
    pub fn load(git: &impl GitCli) -> Result<Self> {
        let base = non_empty(git.config_value("draft-pr.base")?);
        let remote = non_empty(git.config_value("draft-pr.remote")?)
            .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

        let config = Self { base, remote };
        log::debug!("Loaded {:?}", config);
        Ok(config)
    }

    pub fn base_or_default(&self) -> &str {
        self.base.as_deref().unwrap_or(DEFAULT_BASE)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
