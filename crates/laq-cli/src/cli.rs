//! CLI command definitions using clap

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// LAQ - search and question answering over Legislative Assembly Questions
#[derive(Parser)]
#[command(name = "laq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Configuration file path
    #[arg(short = 'c', long, global = true, env = "LAQ_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Semantic search over the indexed LAQs
    Search {
        /// Search text
        query: String,

        /// Number of results (default: retrieval.search_top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Drop results below the configured similarity threshold
        #[arg(long)]
        threshold: bool,

        /// Rank by vector distance only
        #[arg(long)]
        no_rerank: bool,
    },

    /// Ask a question and get an answer grounded in the most relevant LAQs
    Chat {
        /// Question text
        question: String,

        /// Number of LAQs used as context (default: retrieval.chat_top_k)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Check that the embedding, generation and vector store backends respond
    Health,

    /// Print the effective settings
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_flags() {
        let cli = Cli::try_parse_from([
            "laq", "-o", "json", "search", "nurse vacancies", "-k", "3", "--threshold",
            "--no-rerank",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Commands::Search {
                query,
                top_k,
                threshold,
                no_rerank,
            } => {
                assert_eq!(query, "nurse vacancies");
                assert_eq!(top_k, Some(3));
                assert!(threshold);
                assert!(no_rerank);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["laq", "chat", "How many schools?", "-v", "-c", "laq.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("laq.toml")));
        assert!(matches!(cli.command, Commands::Chat { top_k: None, .. }));
    }

    #[test]
    fn command_is_required() {
        assert!(Cli::try_parse_from(["laq"]).is_err());
    }
}
