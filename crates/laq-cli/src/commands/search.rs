//! `laq search` command implementation

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{OutputFormat, print_json, render_result, render_stats};
use colored::Colorize;
use laq_foundation::rag::SearchOptions;
use laq_kernel::rag::{MatchQualityStats, ScoredResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    total_results: usize,
    stats: MatchQualityStats,
    results: &'a [ScoredResult],
}

pub async fn run(
    ctx: &CliContext,
    query: &str,
    top_k: Option<usize>,
    threshold: bool,
    no_rerank: bool,
    format: OutputFormat,
) -> CliResult<()> {
    let mut options = SearchOptions::new(query)
        .with_threshold(threshold)
        .with_rerank(!no_rerank);
    options.top_k = top_k;

    let results = ctx.service.search_with(&options).await?;
    let stats = MatchQualityStats::from_results(&results);

    if format == OutputFormat::Json {
        return print_json(&SearchReport {
            query,
            total_results: results.len(),
            stats,
            results: &results,
        });
    }

    if results.is_empty() {
        println!("{} No LAQs matched \"{}\"", "!".yellow(), query);
        return Ok(());
    }

    println!("{} {} results for \"{}\"", "→".green(), results.len(), query.cyan());
    println!();
    for (i, result) in results.iter().enumerate() {
        println!("{}", render_result(i + 1, result));
        println!();
    }
    println!("Match quality: {}", render_stats(&stats));
    Ok(())
}
