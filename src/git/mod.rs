use crate::errors::{DraftPrError, Result};
use git2::Repository;
use std::path::{Path, PathBuf};
use std::process::Command;

pub mod config;


pub use config::DraftPrConfig;

/// Everything the draft pipeline needs from git
pub trait GitCli {
    /// Run `git <args>`, failing on a non-zero exit status
    fn run(&self, args: &[&str]) -> Result<()>;

    /// Read a single config value, `None` when unset
    fn config_value(&self, key: &str) -> Result<Option<String>>;

    fn remote_url(&self, remote: &str) -> Result<String> {
        self.config_value(&format!("remote.{}.url", remote))?
            .ok_or_else(|| DraftPrError::RemoteNotFound(remote.to_string()))
    }
}

pub struct Git {
    pub repository: Repository,
}

impl Git {
    /// Open the repository containing `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let repository = Repository::discover(path)?;
        log::debug!("Opened repository at {}", repository.path().display());

        Ok(Self { repository })
    }

    fn workdir(&self) -> PathBuf {
        self.repository
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl GitCli for Git {
    fn run(&self, args: &[&str]) -> Result<()> {
        let command = args.join(" ");
        println!("🟢 Running: git {}", command);

        let status = Command::new("git")
            .args(args)
            .current_dir(self.workdir())
            .status()?;

        if !status.success() {
            log::error!("git {} exited with {}", command, status);
            return Err(DraftPrError::GitCommand {
                command,
                status: status.to_string(),
            });
        }

        Ok(())
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        // get_string only works on a snapshot
        let config = self.repository.config()?.snapshot()?;
        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
pub struct MockGit {
    pub config: std::collections::HashMap<String, String>,
    pub fail_on: Option<String>,
    pub commands: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockGit {
    pub fn new() -> Self {
        Self {
            config: std::collections::HashMap::new(),
            fail_on: None,
            commands: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_config(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_remote(self, remote: &str, url: &str) -> Self {
        self.with_config(&format!("remote.{}.url", remote), url)
    }

    /// Make the first command starting with `prefix` exit non-zero
    pub fn failing_on(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl GitCli for MockGit {
    fn run(&self, args: &[&str]) -> Result<()> {
        let command = args.join(" ");
        self.commands.lock().unwrap().push(command.clone());

        match &self.fail_on {
            Some(prefix) if command.starts_with(prefix.as_str()) => {
                Err(DraftPrError::GitCommand {
                    command,
                    status: "exit status: 1".to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.config.get(key).cloned())
    }
}
