use clap::Parser;
use commands::draft::Draft;
use git::Git;

mod commands;
mod config;
mod errors;
mod git;
mod github;
mod remote;

const AFTER_HELP: &str = r#"Examples:
    git draft-pr --branch my-feature-123 --titulo "Add email validation"
    git draft-pr --branch bugfix-issue-77 --titulo "Fix login"

Notes:
    - The base branch defaults to "develop" (or git config draft-pr.base); change it with --base.
    - GITHUB_TOKEN must be exported. Set GITHUB_API_URL for GitHub Enterprise.
    - Missing --branch or --titulo values are asked for interactively."#;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "git-draft-pr", version)]
#[command(about = "Create a branch with an empty commit and open a draft pull request", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    #[command(flatten)]
    draft: Draft,
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let result = Git::open(".").and_then(|git| args.draft.execute(git));

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
