//! `laq health` command implementation

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::{OutputFormat, print_json};
use colored::Colorize;
use laq_foundation::rag::{ComponentHealth, HealthStatus};

pub async fn run(ctx: &CliContext, format: OutputFormat) -> CliResult<()> {
    let report = ctx.service.health().await;

    if format == OutputFormat::Json {
        return print_json(&report);
    }

    let status = match report.status {
        HealthStatus::Healthy => report.status.to_string().green(),
        HealthStatus::Degraded => report.status.to_string().yellow(),
        HealthStatus::Unhealthy => report.status.to_string().red(),
    };
    println!("{} LAQ backends: {}", "→".green(), status);
    println!();

    print_component("Embeddings", &report.embedding_backend);
    print_component("Generation", &report.generation_backend);
    print_component("Vector store", &report.vector_store);

    if let Some(count) = report.record_count {
        println!();
        println!("  Indexed LAQs: {}", count.to_string().cyan());
    }
    Ok(())
}

fn print_component(label: &str, component: &ComponentHealth) {
    let icon = if component.reachable { "✓".green() } else { "✗".red() };
    println!("{} {:<13} {}", icon, label, component.name);
    if let Some(error) = &component.error {
        println!("    {}", error.dimmed());
    }
}
