use crate::{
    config::{token_from, Flags, LinePrompter, Prompter, RunConfig},
    errors::Result,
    git::{DraftPrConfig, Git, GitCli},
    github::{GitHubApi, GitHubClient, NewPullRequest, PullRequest, TOKEN_ENV},
    remote::RepoSlug,
};
use clap::Args;

#[derive(Debug, Args)]
pub struct Draft {
    /// Title of the pull request, also used as the commit message
    #[arg(long, visible_alias = "title")]
    pub titulo: Option<String>,

    /// Base branch to start from and to open the pull request against [default: develop]
    #[arg(long)]
    pub base: Option<String>,

    /// Name of the branch to create
    #[arg(long)]
    pub branch: Option<String>,
}

/// The git invocations, in order, for one run
pub fn git_steps(config: &RunConfig) -> Vec<Vec<&str>> {
    vec![
        vec!["checkout", config.base.as_str()],
        vec!["fetch", config.remote.as_str()],
        vec!["pull"],
        vec!["checkout", "-b", config.branch.as_str()],
        vec!["commit", "--allow-empty", "-m", config.title.as_str()],
        vec!["push", "-u", config.remote.as_str(), config.branch.as_str()],
    ]
}

impl Draft {
    pub fn execute(&self, git: Git) -> Result<()> {
        let token = std::env::var(TOKEN_ENV).ok();
        let pull = self.run(&git, &LinePrompter::stdin(), token, GitHubClient::from_env)?;

        println!("✅ Draft pull request created: {}", pull.html_url);
        Ok(())
    }

    /// Resolve the run, push an empty commit on a new branch and open the draft
    ///
    /// `connect` is only called once every git step has succeeded.
    pub fn run<G, P, H, F>(
        &self,
        git: &G,
        prompter: &P,
        token: Option<String>,
        connect: F,
    ) -> Result<PullRequest>
    where
        G: GitCli,
        P: Prompter,
        H: GitHubApi,
        F: FnOnce(&str) -> Result<H>,
    {
        let settings = DraftPrConfig::load(git)?;
        let flags = Flags {
            title: self.titulo.clone(),
            base: self.base.clone(),
            branch: self.branch.clone(),
        };
        let config = RunConfig::resolve(&flags, &settings, prompter)?;
        log::debug!("Resolved {:?}", config);

        let token = token_from(token)?;

        let remote_url = git.remote_url(&config.remote)?;
        let repo = RepoSlug::parse(&remote_url)?;

        for args in git_steps(&config) {
            git.run(&args)?;
        }

        // No rollback past this point: the branch is already pushed
        let github = connect(&token)?;
        let pull = NewPullRequest::draft(&config.title, &config.branch, &config.base);
        github.create_pull_request(&repo, &pull)
    }
}
