//! LAQ CLI - semantic search and grounded chat over Legislative Assembly Questions

mod cli;
mod commands;
mod context;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use context::CliContext;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose; logs go to stderr so JSON output stays clean
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_command_async(cli))
}

async fn run_command_async(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::new(cli.config.as_deref())?;

    match cli.command {
        Commands::Search {
            query,
            top_k,
            threshold,
            no_rerank,
        } => {
            commands::search::run(&ctx, &query, top_k, threshold, no_rerank, cli.output).await?;
        }

        Commands::Chat { question, top_k } => {
            commands::chat::run(&ctx, &question, top_k, cli.output).await?;
        }

        Commands::Health => {
            commands::health::run(&ctx, cli.output).await?;
        }

        Commands::Config => {
            commands::config_cmd::run(&ctx.settings, cli.output)?;
        }
    }

    Ok(())
}
