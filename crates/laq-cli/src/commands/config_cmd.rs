//! `laq config` command implementation

use crate::error::CliResult;
use crate::output::{OutputFormat, print_json};
use laq_kernel::RagSettings;

/// Print the settings in effect after file and environment overrides.
pub fn run(settings: &RagSettings, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(settings),
        OutputFormat::Text => {
            print!("{}", render_toml(settings)?);
            Ok(())
        }
    }
}

fn render_toml(settings: &RagSettings) -> CliResult<String> {
    Ok(toml::to_string_pretty(settings)?)
}
