//! Ranked evidence retrieval

use crate::similarity::cosine;
use std::cmp::Ordering;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use vouch_domain::traits::{ChunkFilter, DocumentStore, StoreError};
use vouch_domain::EvidenceChunk;

/// Errors that can occur during retrieval
#[derive(Error, Debug)]
pub enum RetrieverError {
    /// The document store failed; propagated, never masked as empty results
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid retrieval parameters
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

/// Parameters for one retrieval call.
#[derive(Debug, Clone, Copy)]
pub struct RetrievalParams {
    /// Maximum chunks to return
    pub limit: usize,

    /// Minimum similarity score; results below it are discarded
    pub min_score: f32,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            limit: 5,
            min_score: 0.3,
        }
    }
}

impl RetrievalParams {
    /// Validate the parameters
    pub fn validate(&self) -> Result<(), RetrieverError> {
        if self.limit == 0 {
            return Err(RetrieverError::InvalidParams(
                "limit must be greater than 0".to_string(),
            ));
        }
        if !(-1.0..=1.0).contains(&self.min_score) {
            return Err(RetrieverError::InvalidParams(format!(
                "min_score {} outside [-1.0, 1.0]",
                self.min_score
            )));
        }
        Ok(())
    }
}

/// Retrieves ranked, attributed evidence for a query embedding.
pub struct Retriever<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Retriever<S> {
    /// Create a retriever over the given store
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Retrieve the top evidence chunks for a query embedding.
    ///
    /// Scans the tenant-scoped snapshot, computes cosine similarity for
    /// every chunk that carries an embedding, discards scores below
    /// `min_score`, sorts descending and truncates to `limit`. Ties keep
    /// corpus scan order (the sort is stable); the tie-break is testable
    /// but carries no semantic meaning.
    ///
    /// Every returned chunk belongs to `tenant_id`; a chunk the store hands
    /// back under the wrong tenant is dropped and logged, never surfaced.
    pub async fn retrieve(
        &self,
        query_embedding: &[f32],
        tenant_id: &str,
        params: RetrievalParams,
        filter: &ChunkFilter,
    ) -> Result<Vec<EvidenceChunk>, RetrieverError> {
        params.validate()?;

        let snapshot = self.store.find(tenant_id, filter).await?;
        debug!(
            tenant_id,
            chunks = snapshot.len(),
            "scanning corpus snapshot"
        );

        let mut scored: Vec<EvidenceChunk> = Vec::new();
        for chunk in snapshot {
            if chunk.tenant_id != tenant_id {
                warn!(
                    expected = tenant_id,
                    actual = %chunk.tenant_id,
                    "store returned chunk for wrong tenant, dropping"
                );
                continue;
            }

            let Some(embedding) = chunk.embedding else {
                continue;
            };

            let similarity = cosine(query_embedding, &embedding);
            if similarity < params.min_score {
                continue;
            }

            scored.push(EvidenceChunk {
                ordinal: 0, // assigned after ranking
                text: chunk.text,
                embedding,
                similarity,
                source: chunk.source,
                tenant_id: chunk.tenant_id,
            });
        }

        // Stable sort: equal scores keep scan order.
        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(params.limit);

        for (index, chunk) in scored.iter_mut().enumerate() {
            chunk.ordinal = index + 1;
        }

        debug!(
            tenant_id,
            returned = scored.len(),
            top_score = scored.first().map(|c| c.similarity),
            "retrieval complete"
        );

        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocumentStore;
    use vouch_domain::{SourceRef, StoredChunk};

    fn chunk(tenant: &str, text: &str, embedding: Vec<f32>) -> StoredChunk {
        StoredChunk {
            tenant_id: tenant.to_string(),
            text: text.to_string(),
            embedding: Some(embedding),
            source: SourceRef::new(format!("src-{}", text)),
        }
    }

    fn store_with(chunks: Vec<StoredChunk>) -> Arc<MemoryDocumentStore> {
        Arc::new(MemoryDocumentStore::with_chunks(chunks))
    }

    #[tokio::test]
    async fn test_threshold_and_order() {
        // Cosine scores against [1, 0]: 0.9-ish, 0.4-ish, 0.1-ish
        let store = store_with(vec![
            chunk("t1", "low", vec![0.1, 0.995]),
            chunk("t1", "high", vec![0.9, 0.436]),
            chunk("t1", "mid", vec![0.4, 0.917]),
        ]);
        let retriever = Retriever::new(store);

        let params = RetrievalParams {
            limit: 10,
            min_score: 0.3,
        };
        let results = retriever
            .retrieve(&[1.0, 0.0], "t1", params, &ChunkFilter::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "high");
        assert_eq!(results[1].text, "mid");
        assert!(results[0].similarity >= results[1].similarity);
        for result in &results {
            assert!(result.similarity >= 0.3);
        }
    }

    #[tokio::test]
    async fn test_ordinals_are_one_based_rank_positions() {
        let store = store_with(vec![
            chunk("t1", "b", vec![0.5, 0.866]),
            chunk("t1", "a", vec![1.0, 0.0]),
        ]);
        let retriever = Retriever::new(store);

        let results = retriever
            .retrieve(
                &[1.0, 0.0],
                "t1",
                RetrievalParams {
                    limit: 5,
                    min_score: 0.0,
                },
                &ChunkFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(results[0].ordinal_id(), "chunk_1");
        assert_eq!(results[0].text, "a");
        assert_eq!(results[1].ordinal_id(), "chunk_2");
    }

    #[tokio::test]
    async fn test_limit_truncation() {
        let store = store_with(
            (0..10)
                .map(|i| chunk("t1", &format!("c{}", i), vec![1.0, i as f32 * 0.01]))
                .collect(),
        );
        let retriever = Retriever::new(store);

        let results = retriever
            .retrieve(
                &[1.0, 0.0],
                "t1",
                RetrievalParams {
                    limit: 3,
                    min_score: 0.0,
                },
                &ChunkFilter::default(),
            )
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_tenant_isolation() {
        let store = store_with(vec![
            chunk("t1", "mine", vec![1.0, 0.0]),
            chunk("t2", "other", vec![1.0, 0.0]),
        ]);
        let retriever = Retriever::new(store);

        let results = retriever
            .retrieve(
                &[1.0, 0.0],
                "t1",
                RetrievalParams::default(),
                &ChunkFilter::default(),
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        for result in &results {
            assert_eq!(result.tenant_id, "t1");
        }
    }

    #[tokio::test]
    async fn test_chunks_without_embeddings_are_skipped() {
        let mut unembedded = chunk("t1", "raw", vec![]);
        unembedded.embedding = None;
        let store = store_with(vec![unembedded, chunk("t1", "ready", vec![1.0, 0.0])]);
        let retriever = Retriever::new(store);

        let results = retriever
            .retrieve(
                &[1.0, 0.0],
                "t1",
                RetrievalParams::default(),
                &ChunkFilter::default(),
            )
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].text, "ready");
    }

    #[tokio::test]
    async fn test_stable_tie_break_keeps_scan_order() {
        // Identical embeddings produce identical scores; scan order decides.
        let store = store_with(vec![
            chunk("t1", "first", vec![1.0, 0.0]),
            chunk("t1", "second", vec![1.0, 0.0]),
        ]);
        let retriever = Retriever::new(store);

        let results = retriever
            .retrieve(
                &[1.0, 0.0],
                "t1",
                RetrievalParams::default(),
                &ChunkFilter::default(),
            )
            .await
            .unwrap();
        assert_eq!(results[0].text, "first");
        assert_eq!(results[1].text, "second");
    }

    #[tokio::test]
    async fn test_zero_limit_rejected() {
        let store = store_with(vec![]);
        let retriever = Retriever::new(store);
        let result = retriever
            .retrieve(
                &[1.0],
                "t1",
                RetrievalParams {
                    limit: 0,
                    min_score: 0.0,
                },
                &ChunkFilter::default(),
            )
            .await;
        assert!(matches!(result, Err(RetrieverError::InvalidParams(_))));
    }
}
