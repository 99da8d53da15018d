//! Text rendering for ranked results

use colored::{ColoredString, Colorize};
use laq_foundation::rag::context::format_percentage;
use laq_kernel::rag::{MatchQuality, MatchQualityStats, ScoredResult};

/// Tier label coloured green / yellow / red.
pub fn quality_badge(quality: MatchQuality) -> ColoredString {
    match quality {
        MatchQuality::Strong => quality.label().green(),
        MatchQuality::Moderate => quality.label().yellow(),
        MatchQuality::Weak => quality.label().red(),
    }
}

/// One result as a short multi-line block, numbered by rank.
pub fn render_result(rank: usize, result: &ScoredResult) -> String {
    let record = result.record();
    let laq_num = record.laq_num.as_deref().unwrap_or("N/A");
    let laq_type = record.laq_type.as_deref().unwrap_or("N/A");
    let date = record.date.as_deref().unwrap_or("N/A");

    let mut score = format!("{}%", format_percentage(result.similarity));
    if let Some(original) = result.original_similarity {
        score.push_str(&format!(" (vector {}%)", format_percentage(original)));
    }

    let mut lines = vec![format!(
        "{}. LAQ #{} ({}) - {}  {}  {}",
        rank,
        laq_num.bold(),
        laq_type,
        date,
        score.cyan(),
        quality_badge(result.match_quality)
    )];
    if let Some(minister) = &record.minister {
        lines.push(format!("   Minister: {minister}"));
    }
    if let Some(question) = &record.question {
        lines.push(format!("   Q: {question}"));
    }
    if let Some(answer) = &record.answer {
        lines.push(format!("   A: {answer}"));
    }
    if !record.attachments.is_empty() {
        lines.push(format!("   Attachments: {}", record.attachments.join(", ")));
    }
    lines.join("\n")
}

pub fn render_stats(stats: &MatchQualityStats) -> String {
    format!(
        "{} strong, {} moderate, {} weak",
        stats.strong.to_string().green(),
        stats.moderate.to_string().yellow(),
        stats.weak.to_string().red()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result() -> ScoredResult {
        let serde_json::Value::Object(metadata) = json!({
            "laq_num": "324",
            "type": "Starred",
            "date": "12-03-2025",
            "question": "How many schools?",
            "attachments": "[\"Annexure-I\"]"
        }) else {
            panic!("expected object");
        };
        ScoredResult {
            id: "laq-324".into(),
            distance: 0.22,
            similarity: 88.5,
            original_similarity: Some(78.0),
            match_quality: MatchQuality::Moderate,
            metadata,
            document: String::new(),
        }
    }

    #[test]
    fn renders_scores_and_fields() {
        colored::control::set_override(false);
        let text = render_result(1, &result());
        assert!(text.starts_with("1. LAQ #324 (Starred) - 12-03-2025  88.5% (vector 78.0%)  MODERATE MATCH"));
        assert!(text.contains("\n   Q: How many schools?"));
        assert!(text.contains("\n   Attachments: Annexure-I"));
        assert!(!text.contains("Minister"));
    }
}
