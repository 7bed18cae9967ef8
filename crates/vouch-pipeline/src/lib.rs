//! Vouch Pipeline
//!
//! Sequences the decision pipeline for one question: classify, route,
//! select a model, embed, retrieve, generate, verify, assemble. Each stage
//! runs in strict order within a request; requests for different tenants or
//! questions run concurrently with no shared mutable state beyond the
//! provider client cache.
//!
//! Degraded data (no evidence, no claims) is a value, not an error; a
//! failing external collaborator is an error, never an empty answer.

#![warn(missing_docs)]

mod config;
mod error;
mod pipeline;

pub use config::{GenerationConfig, PipelineConfig, RetrievalConfig};
pub use error::PipelineError;
pub use pipeline::{Pipeline, QueryRequest};
