//! Process-scoped provider client cache

use crate::ollama::OllamaClient;
use crate::resolver::{ProviderResolver, ResolvedProviders};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;
use vouch_domain::traits::ProviderError;

/// Cache of Ollama clients keyed by model identifier.
///
/// Construction happens while holding the map lock, so two concurrent
/// requests selecting the same previously-unused model get the same client
/// instance; divergent double-construction cannot happen. Client
/// construction is cheap (an HTTP connection pool handle), so serializing
/// first-use does not matter.
pub struct ClientRegistry {
    endpoint: String,
    timeout: Duration,
    max_retries: u32,
    clients: Mutex<HashMap<String, Arc<OllamaClient>>>,
}

impl ClientRegistry {
    /// Create a registry building clients against the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(crate::ollama::DEFAULT_TIMEOUT_SECS),
            max_retries: crate::ollama::DEFAULT_MAX_RETRIES,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Set the per-request timeout used for newly built clients
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry attempts used for newly built clients
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Get the client for a model, building it on first use
    pub async fn client_for(&self, model: &str) -> Result<Arc<OllamaClient>, ProviderError> {
        let mut clients = self.clients.lock().await;

        if let Some(client) = clients.get(model) {
            return Ok(Arc::clone(client));
        }

        debug!(model, "building provider client");
        let client = Arc::new(
            OllamaClient::with_timeout(self.endpoint.clone(), model, self.timeout)?
                .with_max_retries(self.max_retries),
        );
        clients.insert(model.to_string(), Arc::clone(&client));
        Ok(client)
    }

    /// Number of cached clients
    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }

    /// Whether no client has been built yet
    pub async fn is_empty(&self) -> bool {
        self.clients.lock().await.is_empty()
    }
}

#[async_trait]
impl ProviderResolver for ClientRegistry {
    async fn resolve(&self, model: &str) -> Result<ResolvedProviders, ProviderError> {
        let client = self.client_for(model).await?;
        Ok(ResolvedProviders {
            embedder: client.clone(),
            generator: client,
        })
    }
}
