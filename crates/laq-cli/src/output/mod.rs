//! Output formatting module
//!
//! Every command can print human-readable text or JSON for automation.

mod text;

pub use text::{quality_badge, render_result, render_stats};

use crate::error::CliResult;
use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for automation
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
