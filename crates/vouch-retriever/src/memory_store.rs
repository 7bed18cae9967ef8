//! In-memory document store for tests and demos

use async_trait::async_trait;
use vouch_domain::traits::{ChunkFilter, DocumentStore, StoreError};
use vouch_domain::StoredChunk;

/// Tenant-partitioned in-memory chunk store.
///
/// Returns a cloned snapshot per call, matching the static-snapshot
/// contract of [`DocumentStore::find`]. Used by tests and the demo CLI;
/// production corpora live behind a real store implementation.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    chunks: Vec<StoredChunk>,
}

impl MemoryDocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with chunks
    pub fn with_chunks(chunks: Vec<StoredChunk>) -> Self {
        Self { chunks }
    }

    /// Add a chunk
    pub fn add(&mut self, chunk: StoredChunk) {
        self.chunks.push(chunk);
    }

    /// Number of stored chunks across all tenants
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the store holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(
        &self,
        tenant_id: &str,
        filter: &ChunkFilter,
    ) -> Result<Vec<StoredChunk>, StoreError> {
        Ok(self
            .chunks
            .iter()
            .filter(|chunk| chunk.tenant_id == tenant_id)
            .filter(|chunk| match &filter.source_id {
                Some(source_id) => &chunk.source.source_id == source_id,
                None => true,
            })
            .cloned()
            .collect())
    }
}
