//! `laq chat` command implementation

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{OutputFormat, print_json, quality_badge};
use colored::Colorize;
use laq_foundation::rag::context::format_percentage;

pub async fn run(ctx: &CliContext, question: &str, top_k: Option<usize>, format: OutputFormat) -> CliResult<()> {
    let answer = ctx.service.chat(question, top_k).await?;

    if format == OutputFormat::Json {
        return print_json(&answer);
    }

    println!("{}", answer.answer.trim());

    if answer.sources.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Sources:".bold());
    for source in &answer.sources {
        let record = source.record();
        println!(
            "  - LAQ #{} ({}) {}% {}",
            record.laq_num.as_deref().unwrap_or("N/A"),
            record.date.as_deref().unwrap_or("N/A"),
            format_percentage(source.similarity),
            quality_badge(source.match_quality)
        );
    }
    Ok(())
}
