pub mod client;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{GitHubApi, GitHubClient, TOKEN_ENV};
pub use types::{NewPullRequest, PullRequest};
