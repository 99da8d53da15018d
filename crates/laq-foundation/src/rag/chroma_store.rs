//! Chroma vector store client
//!
//! Read-only access to a Chroma collection over its HTTP API (v1 routes).
//! The collection id is looked up by name on first use and cached.

use crate::http::{build_client, status_detail, transport_error};
use async_trait::async_trait;
use laq_kernel::rag::{Metadata, QueryBundle, VectorStore};
use laq_kernel::settings::VectorStoreSettings;
use laq_kernel::{BackendError, BackendResult};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

const INCLUDE: [&str; 3] = ["metadatas", "documents", "distances"];

/// Chroma endpoint configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ChromaConfig {
    /// Server URL (default: http://localhost:8000)
    pub url: String,
    /// Collection holding the LAQ records
    pub collection: String,
    pub timeout_secs: u64,
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self::from(&VectorStoreSettings::default())
    }
}

impl From<&VectorStoreSettings> for ChromaConfig {
    fn from(settings: &VectorStoreSettings) -> Self {
        Self {
            url: settings.url.clone(),
            collection: settings.collection.clone(),
            timeout_secs: settings.timeout_secs,
        }
    }
}

impl ChromaConfig {
    pub fn new(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            collection: collection.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query_embeddings: [&'a [f32]; 1],
    n_results: usize,
    include: [&'static str; 3],
}

/// Query response, batched by query embedding. Chroma may null out
/// individual entries, and whole fields when they were not included.
#[derive(Deserialize)]
struct QueryResponse {
    ids: Vec<Vec<String>>,
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<Option<Metadata>>>>,
    #[serde(default)]
    documents: Option<Vec<Vec<Option<String>>>>,
}

impl QueryResponse {
    /// Unwrap the single query batch into a flat bundle.
    fn into_bundle(self) -> BackendResult<QueryBundle> {
        fn first<T>(batches: Option<Vec<Vec<T>>>) -> Vec<T> {
            batches
                .and_then(|b| b.into_iter().next())
                .unwrap_or_default()
        }

        let ids = self.ids.into_iter().next().unwrap_or_default();
        let distances = first(self.distances)
            .into_iter()
            .map(|d| {
                d.ok_or_else(|| BackendError::InvalidResponse("chroma returned a null distance".to_string()))
            })
            .collect::<BackendResult<Vec<f64>>>()?;
        let metadatas = first(self.metadatas)
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();
        let documents = first(self.documents)
            .into_iter()
            .map(Option::unwrap_or_default)
            .collect();

        Ok(QueryBundle {
            ids,
            distances,
            metadatas,
            documents,
        })
    }
}

pub struct ChromaVectorStore {
    client: reqwest::Client,
    config: ChromaConfig,
    collection_id: OnceCell<String>,
}

impl ChromaVectorStore {
    pub fn new(config: ChromaConfig) -> BackendResult<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config,
            collection_id: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &ChromaConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.config.url.trim_end_matches('/'))
    }

    /// Whether the server answers its heartbeat endpoint.
    pub async fn heartbeat(&self) -> BackendResult<bool> {
        let response = self
            .client
            .get(self.url("/heartbeat"))
            .send()
            .await
            .map_err(|e| transport_error("chroma", e))?;
        Ok(response.status().is_success())
    }

    async fn collection_id(&self) -> BackendResult<&str> {
        let id = self
            .collection_id
            .get_or_try_init(|| async {
                let response = self
                    .client
                    .get(self.url(&format!("/collections/{}", self.config.collection)))
                    .send()
                    .await
                    .map_err(|e| transport_error("chroma", e))?;

                if !response.status().is_success() {
                    return Err(BackendError::VectorStore(format!(
                        "collection '{}' unavailable: {}",
                        self.config.collection,
                        status_detail(response).await
                    )));
                }

                let info: CollectionInfo = response.json().await.map_err(|e| transport_error("chroma", e))?;
                debug!(collection = %self.config.collection, id = %info.id, "resolved chroma collection");
                Ok::<_, BackendError>(info.id)
            })
            .await?;
        Ok(id.as_str())
    }
}

#[async_trait]
impl VectorStore for ChromaVectorStore {
    fn name(&self) -> &str {
        "chroma"
    }

    async fn health_check(&self) -> BackendResult<bool> {
        self.heartbeat().await
    }

    async fn query(&self, embedding: &[f32], n_results: usize) -> BackendResult<QueryBundle> {
        let id = self.collection_id().await?;
        let body = QueryRequest {
            query_embeddings: [embedding],
            n_results,
            include: INCLUDE,
        };

        let response = self
            .client
            .post(self.url(&format!("/collections/{id}/query")))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("chroma", e))?;

        if !response.status().is_success() {
            return Err(BackendError::VectorStore(format!(
                "query failed: {}",
                status_detail(response).await
            )));
        }

        let parsed: QueryResponse = response.json().await.map_err(|e| transport_error("chroma", e))?;
        let bundle = parsed.into_bundle()?;
        debug!(requested = n_results, returned = bundle.len(), "chroma query");
        Ok(bundle)
    }

    async fn count(&self) -> BackendResult<usize> {
        let id = self.collection_id().await?;
        let response = self
            .client
            .get(self.url(&format!("/collections/{id}/count")))
            .send()
            .await
            .map_err(|e| transport_error("chroma", e))?;

        if !response.status().is_success() {
            return Err(BackendError::VectorStore(format!(
                "count failed: {}",
                status_detail(response).await
            )));
        }

        response.json::<usize>().await.map_err(|e| transport_error("chroma", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> BackendResult<QueryBundle> {
        serde_json::from_value::<QueryResponse>(value)
            .unwrap()
            .into_bundle()
    }

    #[test]
    fn unwraps_single_batch() {
        let bundle = parse(json!({
            "ids": [["laq-1", "laq-2"]],
            "distances": [[0.12, 0.4]],
            "metadatas": [[{ "laq_num": "1" }, null]],
            "documents": [["first", null]],
            "embeddings": null
        }))
        .unwrap();
        assert_eq!(bundle.ids, ["laq-1", "laq-2"]);
        assert_eq!(bundle.metadatas[0]["laq_num"], "1");
        assert!(bundle.metadatas[1].is_empty());
        assert_eq!(bundle.documents, ["first", ""]);
    }

    #[test]
    fn empty_batch_gives_empty_bundle() {
        let bundle = parse(json!({ "ids": [[]], "distances": [[]], "metadatas": [[]] })).unwrap();
        assert!(bundle.is_empty());
        let bundle = parse(json!({ "ids": [] })).unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn null_distance_is_invalid_response() {
        let err = parse(json!({
            "ids": [["a"]],
            "distances": [[null]],
            "metadatas": [[{}]]
        }))
        .unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[test]
    fn query_request_wire_shape() {
        let embedding = [0.5_f32, 0.25];
        let body = serde_json::to_value(QueryRequest {
            query_embeddings: [&embedding[..]],
            n_results: 15,
            include: INCLUDE,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "query_embeddings": [[0.5, 0.25]],
                "n_results": 15,
                "include": ["metadatas", "documents", "distances"]
            })
        );
    }

    #[test]
    fn urls_use_v1_routes() {
        let store = ChromaVectorStore::new(ChromaConfig::new("http://chroma:8000/", "laqs")).unwrap();
        assert_eq!(store.url("/heartbeat"), "http://chroma:8000/api/v1/heartbeat");
        assert_eq!(store.config().timeout_secs, 30);
    }
}
