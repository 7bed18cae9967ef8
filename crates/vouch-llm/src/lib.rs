//! Vouch Provider Layer
//!
//! Pluggable embedding and generation providers behind the trait seams in
//! `vouch-domain`, plus the machinery the orchestrator needs to pick one:
//!
//! - `OllamaClient`: local Ollama API integration (embeddings + generation)
//! - `MockEmbeddingProvider` / `MockGenerativeProvider`: deterministic mocks
//!   for testing
//! - `ClientRegistry`: process-scoped client cache keyed by model id, safe
//!   under concurrent first-use
//! - `ModelPolicy`: ordered rule list mapping {tenant, task class, persona}
//!   to a model id with a fallback
//!
//! # Examples
//!
//! ```
//! use vouch_llm::MockEmbeddingProvider;
//! use vouch_domain::traits::EmbeddingProvider;
//!
//! # tokio_test::block_on(async {
//! let provider = MockEmbeddingProvider::new(384);
//! let embedding = provider.embed("the sky is blue").await.unwrap();
//! assert_eq!(embedding.dimensions, 384);
//! # });
//! ```

#![warn(missing_docs)]

mod mock;
mod ollama;
mod parser;
mod policy;
mod prompt;
mod registry;
mod resolver;

pub use mock::{MockEmbeddingProvider, MockGenerativeProvider};
pub use ollama::OllamaClient;
pub use parser::parse_generation_payload;
pub use policy::{ModelPolicy, PolicyRule};
pub use prompt::GenerationPrompt;
pub use registry::ClientRegistry;
pub use resolver::{ProviderResolver, ResolvedProviders, StaticProviders};
