//! Provider resolution seam for the orchestrator

use async_trait::async_trait;
use std::sync::Arc;
use vouch_domain::traits::{EmbeddingProvider, GenerativeProvider, ProviderError};

/// The providers resolved for one model selection.
#[derive(Clone)]
pub struct ResolvedProviders {
    /// Embedding provider for the selected model
    pub embedder: Arc<dyn EmbeddingProvider>,

    /// Generative provider for the selected model
    pub generator: Arc<dyn GenerativeProvider>,
}

/// Maps a model identifier to concrete providers.
///
/// The orchestrator goes through this seam so production (a
/// [`ClientRegistry`](crate::ClientRegistry)) and tests (a
/// [`StaticProviders`]) plug in the same way.
#[async_trait]
pub trait ProviderResolver: Send + Sync {
    /// Resolve providers for the given model id
    async fn resolve(&self, model: &str) -> Result<ResolvedProviders, ProviderError>;
}

/// Fixed providers returned for every model id.
///
/// The test and demo resolver; model selection still happens upstream, the
/// resolution step just ignores it.
#[derive(Clone)]
pub struct StaticProviders {
    providers: ResolvedProviders,
}

impl StaticProviders {
    /// Wrap a fixed embedder/generator pair
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerativeProvider>,
    ) -> Self {
        Self {
            providers: ResolvedProviders {
                embedder,
                generator,
            },
        }
    }
}

#[async_trait]
impl ProviderResolver for StaticProviders {
    async fn resolve(&self, _model: &str) -> Result<ResolvedProviders, ProviderError> {
        Ok(self.providers.clone())
    }
}
