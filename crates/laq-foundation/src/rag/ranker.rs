//! Relevance ranking
//!
//! Turns store candidates into scored results and optionally re-ranks them
//! with two fixed heuristics layered on top of vector similarity:
//!
//! - keyword boost: query-term overlap with the record's question (weight
//!   0.7) and answer (weight 0.3), scaled to roughly 0–10 points
//! - freshness boost: +2 points for records dated 2024 or later
//!
//! The weights are part of the output contract; changing them changes
//! every ranking the system has produced.

use laq_kernel::rag::{Candidate, MatchQuality, ScoredResult};
use std::collections::HashSet;
use tracing::debug;

/// How many candidates to fetch per requested result when re-ranking.
pub const OVER_RETRIEVAL_FACTOR: usize = 3;

/// Upper bound on the re-ranking pool.
pub const MAX_CANDIDATE_POOL: usize = 30;

const QUESTION_WEIGHT: f64 = 0.7;
const ANSWER_WEIGHT: f64 = 0.3;
const KEYWORD_SCALE: f64 = 10.0;
const FRESHNESS_BONUS: f64 = 2.0;
const FRESHNESS_MIN_YEAR: i64 = 2024;

/// Number of candidates to request from the store for `top_k` results.
///
/// Re-ranking over-fetches (`min(top_k × 3, 30)`) so the boosts have a larger
/// pool to reorder before truncation; without re-ranking exactly `top_k`.
pub fn candidate_pool_size(top_k: usize, rerank: bool) -> usize {
    if rerank {
        top_k.saturating_mul(OVER_RETRIEVAL_FACTOR).min(MAX_CANDIDATE_POOL)
    } else {
        top_k
    }
}

/// Round to two decimals from the exact binary value of `value`.
///
/// `50.385` is stored just below `.385` and rounds down to `50.38`; exact
/// ties (`0.125`) go to the even digit.
pub fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Unrounded `(1 - distance) × 100`.
pub fn raw_similarity(distance: f64) -> f64 {
    (1.0 - distance) * 100.0
}

/// `(1 - distance) × 100`, clamped to `0..=100` and rounded to 2 decimals.
///
/// Distances above 1 (possible with cosine distance) floor at 0.
pub fn similarity_from_distance(distance: f64) -> f64 {
    round2(clamp_percent(raw_similarity(distance)))
}

/// Score candidates in store order.
///
/// The tier is taken from the unrounded similarity, so a distance of
/// `0.200001` (79.9999) is moderate even though it displays as `80.0`.
pub fn score_candidates(candidates: Vec<Candidate>) -> Vec<ScoredResult> {
    candidates
        .into_iter()
        .map(|candidate| {
            let similarity = similarity_from_distance(candidate.distance);
            ScoredResult {
                id: candidate.id,
                distance: candidate.distance,
                similarity,
                original_similarity: None,
                match_quality: MatchQuality::from_similarity(raw_similarity(candidate.distance)),
                metadata: candidate.metadata,
                document: candidate.document,
            }
        })
        .collect()
}

/// Lower-case and split on whitespace.
pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Share of query tokens present in `field_tokens`.
fn overlap(query_tokens: &HashSet<String>, field_tokens: &HashSet<String>) -> f64 {
    let shared = query_tokens.intersection(field_tokens).count();
    shared as f64 / query_tokens.len().max(1) as f64
}

/// `(0.7 × question_overlap + 0.3 × answer_overlap) × 10`
pub fn keyword_boost(query_tokens: &HashSet<String>, question: &str, answer: &str) -> f64 {
    let question_overlap = overlap(query_tokens, &tokenize(question));
    let answer_overlap = overlap(query_tokens, &tokenize(answer));
    (QUESTION_WEIGHT * question_overlap + ANSWER_WEIGHT * answer_overlap) * KEYWORD_SCALE
}

/// +2 when the text after the last `-` of `date` is a year ≥ 2024.
///
/// Heuristic tuned for the `DD-MM-YYYY` dates in the LAQ corpus. Dates
/// without a `-` never qualify, and ISO `YYYY-MM-DD` dates end in the day,
/// so they never qualify either. Unparseable dates score 0.
pub fn freshness_boost(date: &str) -> f64 {
    if !date.contains('-') {
        return 0.0;
    }
    let year = date
        .rsplit('-')
        .next()
        .and_then(|tail| tail.trim().parse::<i64>().ok());
    match year {
        Some(year) if year >= FRESHNESS_MIN_YEAR => FRESHNESS_BONUS,
        _ => 0.0,
    }
}

/// Apply keyword and freshness boosts and sort by boosted similarity.
///
/// Returns a new list; the boosted score replaces `similarity` and the
/// previous value moves to `original_similarity`. The sort is stable, so
/// ties keep their incoming (ascending distance) order.
pub fn rerank(query: &str, results: Vec<ScoredResult>) -> Vec<ScoredResult> {
    let query_tokens = tokenize(query);

    let mut boosted: Vec<ScoredResult> = results
        .into_iter()
        .map(|result| {
            let record = result.record();
            let keyword = keyword_boost(
                &query_tokens,
                record.question.as_deref().unwrap_or_default(),
                record.answer.as_deref().unwrap_or_default(),
            );
            let freshness = freshness_boost(record.date.as_deref().unwrap_or_default());
            let original = result.similarity;
            let similarity = clamp_percent(round2(original + keyword + freshness));

            debug!(id = %result.id, original, keyword, freshness, similarity, "boosted candidate");

            ScoredResult {
                similarity,
                original_similarity: Some(original),
                ..result
            }
        })
        .collect();

    boosted.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    boosted
}

/// Full ranking step: score, optionally re-rank, keep the first `top_k`.
pub fn rank(query: &str, candidates: Vec<Candidate>, top_k: usize, rerank_enabled: bool) -> Vec<ScoredResult> {
    let scored = score_candidates(candidates);
    let mut ranked = if rerank_enabled && !scored.is_empty() {
        rerank(query, scored)
    } else {
        scored
    };
    ranked.truncate(top_k);
    ranked
}
