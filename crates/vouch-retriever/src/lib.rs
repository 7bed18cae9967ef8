//! Vouch Retriever
//!
//! Embedding-similarity evidence retrieval over a tenant-scoped corpus.
//!
//! The retriever deliberately performs a linear scan over the tenant's
//! chunks per query: correctness, not amortized performance, is the design
//! goal. A production deployment may put an index behind the
//! [`DocumentStore`](vouch_domain::traits::DocumentStore) trait, but it must
//! preserve the ranking and threshold semantics exactly.
//!
//! Results carry 1-based ordinals (`chunk_1`, `chunk_2`, ...) which are the
//! only citation keys valid for the claims generated from them.

#![warn(missing_docs)]

mod memory_store;
mod retriever;
pub mod similarity;

pub use memory_store::MemoryDocumentStore;
pub use retriever::{RetrievalParams, Retriever, RetrieverError};
