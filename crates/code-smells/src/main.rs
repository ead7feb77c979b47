use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use code_smells_git::DiffCapture;
use code_smells_llm::AnthropicClient;

mod analyze;
mod config;
mod render;

#[derive(Parser, Debug)]
#[command(
    name = "code-smells",
    about = "Analyze git changes for code smells using AI",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Working directory (default: current directory)
    #[arg(short = 'd', long, global = true)]
    working_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configure the API key
    Configure {
        /// Anthropic API key
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Analyze staged changes for code smells
    Commit,
    /// Analyze the current branch against a comparison branch
    Pr {
        /// Branch to compare to
        #[arg(long, default_value = "main")]
        compare: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let working_dir = match cli.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Command::Configure { api_key } => configure(api_key),
        Command::Commit => {
            let api_key = require_api_key()?;
            let diff = DiffCapture::new().staged_diff(&working_dir)?;
            if diff.is_empty() {
                bail!("No staged changes found.");
            }
            run_analysis(api_key, &diff).await
        }
        Command::Pr { compare } => {
            let api_key = require_api_key()?;
            let capture = DiffCapture::new();
            let current = capture.current_branch(&working_dir)?;
            let diff = capture.branch_diff(&working_dir, &compare)?;
            if diff.is_empty() {
                bail!("No changes found between {compare} and {current}.");
            }
            run_analysis(api_key, &diff).await
        }
    }
}

fn require_api_key() -> Result<String> {
    config::resolve_api_key().with_context(|| {
        format!(
            "No API key found. Please run the `configure` command first or set the {} environment variable.",
            config::API_KEY_ENV_VAR
        )
    })
}

fn configure(api_key: Option<String>) -> Result<()> {
    let api_key = match api_key {
        Some(key) => key,
        None => dialoguer::Password::new()
            .with_prompt("Please enter your Anthropic API key")
            .interact()
            .context("Failed to read API key")?,
    };

    let path = config::save_api_key(&api_key)?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn run_analysis(api_key: String, diff: &str) -> Result<()> {
    let client = AnthropicClient::new(api_key);

    eprintln!("{}", "Analyzing code smells...".cyan());
    let document = analyze::analyze_diff(&client, diff).await?;

    render::render_analysis(&document);
    Ok(())
}
