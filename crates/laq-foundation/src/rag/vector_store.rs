//! In-memory vector store implementation
//!
//! Brute-force cosine search over records held in insertion order. Used
//! for local runs and tests; production queries go to Chroma.

use crate::rag::similarity::cosine_distance;
use async_trait::async_trait;
use laq_kernel::rag::{Metadata, QueryBundle, VectorStore};
use laq_kernel::{BackendError, BackendResult};
use serde_json::Value;

/// One stored record: id, embedding, LAQ metadata and source text.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedRecord {
    pub id: String,
    pub document: String,
    pub embedding: Vec<f32>,
    pub metadata: Metadata,
}

impl IndexedRecord {
    pub fn new(id: impl Into<String>, document: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            document: document.into(),
            embedding,
            metadata: Metadata::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// In-memory vector store using brute-force cosine distance.
///
/// Equal distances come back in insertion order.
///
/// # Example
///
/// ```rust,ignore
/// use laq_foundation::rag::{InMemoryVectorStore, IndexedRecord};
///
/// let mut store = InMemoryVectorStore::new();
/// store.upsert(IndexedRecord::new("324", "LAQ 324 text", vec![0.1, 0.2, 0.3]));
///
/// let bundle = store.query(&[0.1, 0.2, 0.3], 5).await?;
/// ```
#[derive(Debug, Default)]
pub struct InMemoryVectorStore {
    records: Vec<IndexedRecord>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record with the same id in place.
    pub fn upsert(&mut self, record: IndexedRecord) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn upsert_batch(&mut self, records: impl IntoIterator<Item = IndexedRecord>) {
        for record in records {
            self.upsert(record);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn query(&self, embedding: &[f32], n_results: usize) -> BackendResult<QueryBundle> {
        if let Some(record) = self.records.iter().find(|r| r.embedding.len() != embedding.len()) {
            return Err(BackendError::VectorStore(format!(
                "embedding dimension {} does not match record '{}' ({})",
                embedding.len(),
                record.id,
                record.embedding.len()
            )));
        }

        let mut scored: Vec<(f64, &IndexedRecord)> = self
            .records
            .iter()
            .map(|record| (cosine_distance(&record.embedding, embedding), record))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(n_results);

        let mut bundle = QueryBundle::default();
        for (distance, record) in scored {
            bundle.ids.push(record.id.clone());
            bundle.distances.push(distance);
            bundle.metadatas.push(record.metadata.clone());
            bundle.documents.push(record.document.clone());
        }
        Ok(bundle)
    }

    async fn count(&self) -> BackendResult<usize> {
        Ok(self.records.len())
    }
}
