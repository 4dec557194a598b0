use anyhow::Result;
use clap::Parser;
use mergebase_core::{GithubConfig, LastCommonCommitsFinder};

#[derive(Parser)]
#[command(name = "mergebase")]
#[command(about = "Find the last common commits of two GitHub branches", long_about = None)]
struct Cli {
    /// Repository owner (user or organization)
    #[arg(long)]
    owner: String,
    /// Repository name
    #[arg(long)]
    repo: String,
    /// First branch
    branch_a: String,
    /// Second branch
    branch_b: String,
    /// GitHub API token (https://github.com/settings/tokens)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Maximum commits walked per branch
    #[arg(long, default_value = "1000")]
    max_commits: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let finder = LastCommonCommitsFinder::github(GithubConfig {
        owner: cli.owner,
        repo: cli.repo,
        token: cli.token,
    })
    .max_commits(cli.max_commits);

    let mut commits: Vec<String> = finder
        .find_last_common_commits(&cli.branch_a, &cli.branch_b)
        .await?
        .into_iter()
        .collect();
    commits.sort();

    if commits.is_empty() {
        println!("No common commits within the traversal bound");
    } else {
        for commit in commits {
            println!("{}", commit);
        }
    }

    Ok(())
}
