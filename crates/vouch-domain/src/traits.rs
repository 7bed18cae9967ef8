//! Trait seams for the external collaborators
//!
//! These traits define the boundary between the decision pipeline and its
//! three external collaborators: the embedding provider, the generative
//! provider, and the document store. Infrastructure implementations live in
//! other crates; the pipeline only ever sees these interfaces.
//!
//! Every method here is a suspension point. Everything else in the pipeline
//! (pattern matching, routing, similarity math, scoring) is synchronous.

use crate::{Claim, EvidenceChunk, StoredChunk, TokenUsage};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by embedding and generative providers.
///
/// Provider failures propagate as fatal errors for the request; the pipeline
/// never substitutes fabricated content for a failed call.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response received but unusable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Requested model is not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic provider error
    #[error("Provider error: {0}")]
    Other(String),
}

/// Errors surfaced by the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the query
    #[error("Store query failed: {0}")]
    Query(String),
}

/// An embedding produced for a piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// The embedding vector
    pub vector: Vec<f32>,

    /// Dimensionality of the vector
    pub dimensions: usize,

    /// Tokens consumed to produce it
    pub token_count: u32,
}

/// Knobs passed through to the generative provider.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Persona hint forwarded from the request
    pub persona: Option<String>,

    /// Retrieval hints attached by the classifier
    pub constraints: Vec<String>,
}

/// Draft answer plus atomic claims from the generative provider.
///
/// Claims cite evidence strictly by the `chunk_N` ordinal ids handed to the
/// provider in the same call.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    /// The draft answer text
    pub answer: String,

    /// Atomic claims backing the answer
    pub claims: Vec<Claim>,

    /// Token accounting for the call
    pub token_usage: TokenUsage,
}

/// Filter narrowing which chunks a retrieval call scans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkFilter {
    /// Restrict the scan to a single source document
    pub source_id: Option<String>,
}

/// Text-to-vector conversion.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for the given text
    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError>;

    /// Dimensionality of the embeddings this provider produces
    fn dimensions(&self) -> usize;
}

/// Claim-producing generation over retrieved evidence.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Generate a draft answer plus claims grounded in the given evidence
    async fn generate(
        &self,
        question: &str,
        evidence: &[EvidenceChunk],
        options: &GenerationOptions,
    ) -> Result<Generation, ProviderError>;

    /// Identifier of the model behind this provider
    fn model_id(&self) -> &str;
}

/// Read-only access to the tenant-scoped chunk corpus.
///
/// One call returns a static snapshot for the duration of one retrieval.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the chunks owned by `tenant_id` that match the filter
    async fn find(
        &self,
        tenant_id: &str,
        filter: &ChunkFilter,
    ) -> Result<Vec<StoredChunk>, StoreError>;
}
