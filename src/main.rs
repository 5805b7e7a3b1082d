mod adapters;
mod config;
mod core;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prscope")]
#[command(
    about = "Review a pull request with an LLM and post the review as a PR comment",
    long_about = "Reads GITHUB_TOKEN, AI_KEY, REPO_OWNER, REPO_NAME and PR_NUM from the environment, \
sends the PR's patches to a chat-completion model and posts its answer back to the PR."
)]
#[command(version)]
struct Cli {
    #[arg(long, help = "Model identifier (defaults to gpt-4)")]
    model: Option<String>,

    #[arg(long, help = "Character cap on the diff text sent to the model (0 = no cap)")]
    max_diff_chars: Option<usize>,

    #[arg(long, help = "HTTP timeout in seconds for GitHub and the model")]
    timeout_secs: Option<u64>,

    #[arg(long, value_name = "FILE", help = "Settings file (defaults to .prscope.yml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Print the review instead of posting it")]
    dry_run: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => config::Settings::load_from(path)?,
        None => config::Settings::load()?,
    };
    settings.merge_with_cli(cli.model, cli.max_diff_chars, cli.timeout_secs);

    // Validate inputs before touching the network.
    let config = config::Config::from_env(settings)?;
    info!(
        "Reviewing {} with model {}",
        config.pull_request, config.settings.model
    );

    let host = adapters::GitHubClient::new(config.github_config())?;
    let llm = adapters::OpenAIAdapter::new(config.model_config())?;
    let options = config.pipeline_options(cli.dry_run);

    match core::run_review(&host, &llm, &config.pull_request, &options).await? {
        core::ReviewOutcome::NoDiffs => {
            println!("No diffs found in PR");
        }
        core::ReviewOutcome::Posted { files, truncated } => {
            if truncated {
                info!("Review covered a truncated diff of {} files", files);
            }
            println!("AI code review comment posted successfully");
        }
        core::ReviewOutcome::DryRun { comment } => {
            println!("{}", comment);
        }
    }

    Ok(())
}
