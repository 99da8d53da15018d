//! Context assembly for answer generation
//!
//! Each ranked result becomes a fixed block:
//!
//! ```text
//! LAQ #324 (Starred) - 12-03-2025
//! Minister: Minister for Education
//! Question: ...
//! Answer: ...
//! Attachments: Annexure-I, Annexure-II
//! Relevance: 94.0%
//! ```
//!
//! Blocks are joined in ranked order by [`RECORD_SEPARATOR`]. The
//! attachments line only appears when the record has attachments.

use laq_kernel::rag::ScoredResult;

/// Delimiter between rendered records.
pub const RECORD_SEPARATOR: &str = "\n\n---\n\n";

const MISSING: &str = "N/A";

/// Render all results into one context block, highest relevance first.
pub fn assemble_context(results: &[ScoredResult]) -> String {
    results
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join(RECORD_SEPARATOR)
}

/// Render a single result.
pub fn render_record(result: &ScoredResult) -> String {
    let record = result.record();
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| MISSING.to_string());

    let mut block = format!(
        "LAQ #{} ({}) - {}\nMinister: {}\nQuestion: {}\nAnswer: {}",
        field(&record.laq_num),
        field(&record.laq_type),
        field(&record.date),
        field(&record.minister),
        field(&record.question),
        field(&record.answer),
    );
    if !record.attachments.is_empty() {
        block.push_str("\nAttachments: ");
        block.push_str(&record.attachments.join(", "));
    }
    block.push_str(&format!("\nRelevance: {}%", format_relevance(result)));

    block.trim().to_string()
}

/// Relevance as shown in the context. A re-ranked score capped at 100 is
/// the whole number `100`; every other score goes through [`format_percentage`].
pub fn format_relevance(result: &ScoredResult) -> String {
    if result.original_similarity.is_some() && result.similarity >= 100.0 {
        "100".to_string()
    } else {
        format_percentage(result.similarity)
    }
}

/// Print a score the way it is shown everywhere else: whole numbers keep
/// one decimal (`85.0`), others print their shortest form (`91.23`).
pub fn format_percentage(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
