//! RAG core data types
//!
//! Records are owned by the vector store and only ever read here. A query
//! produces [`Candidate`]s (store hits with a distance), which the ranker
//! turns into [`ScoredResult`]s.

use crate::error::{BackendError, BackendResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Arbitrary record metadata as stored alongside each embedding.
pub type Metadata = serde_json::Map<String, Value>;

/// Similarity at or above which a match is [`MatchQuality::Strong`].
pub const STRONG_MATCH_THRESHOLD: f64 = 80.0;

/// Similarity at or above which a match is [`MatchQuality::Moderate`].
pub const MODERATE_MATCH_THRESHOLD: f64 = 60.0;

/// Read-only typed view of a Legislative Assembly Question record.
///
/// Built from candidate metadata. Known keys are lifted into fields and
/// everything else is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaqRecord {
    pub laq_num: Option<String>,
    pub laq_type: Option<String>,
    pub date: Option<String>,
    pub minister: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub attachments: Vec<String>,
    pub extra: Metadata,
}

impl LaqRecord {
    const KNOWN_KEYS: [&'static str; 7] = [
        "laq_num",
        "type",
        "date",
        "minister",
        "question",
        "answer",
        "attachments",
    ];

    /// Build the typed view. Never fails: absent keys become `None` and
    /// malformed attachments become an empty list.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let text = |key: &str| metadata.get(key).and_then(value_as_text);

        let extra = metadata
            .iter()
            .filter(|(key, _)| !Self::KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            laq_num: text("laq_num"),
            laq_type: text("type"),
            date: text("date"),
            minister: text("minister"),
            question: text("question"),
            answer: text("answer"),
            attachments: metadata
                .get("attachments")
                .map(parse_attachments)
                .unwrap_or_default(),
            extra,
        }
    }
}

/// Render a scalar metadata value as text; `null` and containers are absent.
fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Attachments are stored as a JSON-encoded string array (`'["Annexure-I"]'`)
/// because the store only accepts scalar metadata. A native array is accepted
/// too. Anything that is not a list of strings counts as no attachments.
pub fn parse_attachments(value: &Value) -> Vec<String> {
    match value {
        Value::String(raw) => serde_json::from_str::<Value>(raw)
            .map(|decoded| string_list(&decoded))
            .unwrap_or_default(),
        other => string_list(other),
    }
}

fn string_list(value: &Value) -> Vec<String> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

/// One vector store hit for one query. Lives for a single retrieval call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    /// Dissimilarity reported by the store; 0 means identical
    pub distance: f64,
    pub metadata: Metadata,
    pub document: String,
}

impl Candidate {
    pub fn new(id: impl Into<String>, distance: f64) -> Self {
        Self {
            id: id.into(),
            distance,
            metadata: Metadata::new(),
            document: String::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }

    pub fn record(&self) -> LaqRecord {
        LaqRecord::from_metadata(&self.metadata)
    }
}

/// Coarse similarity bucket. Display only; never affects ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchQuality {
    Strong,
    Moderate,
    Weak,
}

impl MatchQuality {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= STRONG_MATCH_THRESHOLD {
            Self::Strong
        } else if similarity >= MODERATE_MATCH_THRESHOLD {
            Self::Moderate
        } else {
            Self::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "STRONG MATCH",
            Self::Moderate => "MODERATE MATCH",
            Self::Weak => "WEAK MATCH",
        }
    }
}

impl std::fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate with its relevance scores.
///
/// `similarity` is always within `0..=100`. After re-ranking it holds the
/// boosted value and `original_similarity` the value derived from distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub id: String,
    pub distance: f64,
    pub similarity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_similarity: Option<f64>,
    pub match_quality: MatchQuality,
    pub metadata: Metadata,
    pub document: String,
}

impl ScoredResult {
    pub fn record(&self) -> LaqRecord {
        LaqRecord::from_metadata(&self.metadata)
    }
}

/// Raw vector store answer: parallel sequences aligned by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryBundle {
    pub ids: Vec<String>,
    pub distances: Vec<f64>,
    pub metadatas: Vec<Metadata>,
    #[serde(default)]
    pub documents: Vec<String>,
}

impl QueryBundle {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Zip the parallel sequences into candidates, keeping store order.
    ///
    /// `distances` and `metadatas` must match `ids` in length. `documents`
    /// may be shorter (stores can omit them); missing entries become empty.
    pub fn into_candidates(self) -> BackendResult<Vec<Candidate>> {
        let n = self.ids.len();
        if self.distances.len() != n || self.metadatas.len() != n {
            return Err(BackendError::InvalidResponse(format!(
                "misaligned query result: {} ids, {} distances, {} metadatas",
                n,
                self.distances.len(),
                self.metadatas.len()
            )));
        }

        let mut documents = self.documents.into_iter();
        Ok(self
            .ids
            .into_iter()
            .zip(self.distances)
            .zip(self.metadatas)
            .map(|((id, distance), metadata)| Candidate {
                id,
                distance,
                metadata,
                document: documents.next().unwrap_or_default(),
            })
            .collect())
    }
}

/// Count of results per [`MatchQuality`] tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchQualityStats {
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
}

impl MatchQualityStats {
    /// Tally results by their final `similarity`.
    pub fn from_results(results: &[ScoredResult]) -> Self {
        results.iter().fold(Self::default(), |mut stats, result| {
            match MatchQuality::from_similarity(result.similarity) {
                MatchQuality::Strong => stats.strong += 1,
                MatchQuality::Moderate => stats.moderate += 1,
                MatchQuality::Weak => stats.weak += 1,
            }
            stats
        })
    }

    pub fn total(&self) -> usize {
        self.strong + self.moderate + self.weak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> Metadata {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(MatchQuality::from_similarity(85.0), MatchQuality::Strong);
        assert_eq!(MatchQuality::from_similarity(80.0), MatchQuality::Strong);
        assert_eq!(MatchQuality::from_similarity(79.999), MatchQuality::Moderate);
        assert_eq!(MatchQuality::from_similarity(60.0), MatchQuality::Moderate);
        assert_eq!(MatchQuality::from_similarity(59.99), MatchQuality::Weak);
        assert_eq!(MatchQuality::from_similarity(0.0), MatchQuality::Weak);
    }

    #[test]
    fn attachments_from_encoded_string() {
        let value = json!("[\"Annexure-I\",\"Annexure-II\"]");
        assert_eq!(parse_attachments(&value), vec!["Annexure-I", "Annexure-II"]);
    }

    #[test]
    fn attachments_malformed_are_empty() {
        assert!(parse_attachments(&json!("[]")).is_empty());
        assert!(parse_attachments(&json!("not json")).is_empty());
        assert!(parse_attachments(&json!("{\"a\": 1}")).is_empty());
        assert!(parse_attachments(&json!("[1, 2]")).is_empty());
        assert!(parse_attachments(&json!(42)).is_empty());
        assert_eq!(parse_attachments(&json!(["Annexure-A"])), vec!["Annexure-A"]);
    }

    #[test]
    fn record_view_lifts_known_keys() {
        let meta = metadata(json!({
            "laq_num": 324,
            "type": "Starred",
            "date": "12-03-2025",
            "minister": "Minister for Education",
            "question": "How many schools?",
            "answer": "Forty two.",
            "attachments": "[\"Annexure-I\"]",
            "source_file": "laq_324.pdf"
        }));
        let record = LaqRecord::from_metadata(&meta);
        assert_eq!(record.laq_num.as_deref(), Some("324"));
        assert_eq!(record.laq_type.as_deref(), Some("Starred"));
        assert_eq!(record.attachments, vec!["Annexure-I"]);
        assert_eq!(record.extra.len(), 1);
        assert!(record.extra.contains_key("source_file"));
    }

    #[test]
    fn record_view_tolerates_missing_keys() {
        let record = LaqRecord::from_metadata(&Metadata::new());
        assert_eq!(record, LaqRecord::default());
    }

    #[test]
    fn bundle_zips_in_store_order() {
        let bundle = QueryBundle {
            ids: vec!["a".into(), "b".into()],
            distances: vec![0.1, 0.4],
            metadatas: vec![Metadata::new(), Metadata::new()],
            documents: vec!["doc a".into()],
        };
        let candidates = bundle.into_candidates().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "a");
        assert_eq!(candidates[0].document, "doc a");
        assert_eq!(candidates[1].document, "");
        assert!((candidates[1].distance - 0.4).abs() < 1e-12);
    }

    #[test]
    fn misaligned_bundle_is_invalid_response() {
        let bundle = QueryBundle {
            ids: vec!["a".into(), "b".into()],
            distances: vec![0.1],
            metadatas: vec![Metadata::new(), Metadata::new()],
            documents: vec![],
        };
        let err = bundle.into_candidates().unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[test]
    fn stats_count_each_tier() {
        let result = |similarity: f64| ScoredResult {
            id: "x".into(),
            distance: 0.0,
            similarity,
            original_similarity: None,
            match_quality: MatchQuality::from_similarity(similarity),
            metadata: Metadata::new(),
            document: String::new(),
        };
        let stats = MatchQualityStats::from_results(&[
            result(92.0),
            result(81.5),
            result(65.0),
            result(12.0),
        ]);
        assert_eq!(
            stats,
            MatchQualityStats {
                strong: 2,
                moderate: 1,
                weak: 1
            }
        );
        assert_eq!(stats.total(), 4);
    }
}
