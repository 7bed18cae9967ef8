//! Ollama provider implementation
//!
//! Talks to a local Ollama instance for both embedding generation and
//! grounded claim generation. Retries transient HTTP failures with
//! exponential backoff; a missing model surfaces as
//! [`ProviderError::ModelNotAvailable`] without retrying.

use crate::parser::parse_generation_payload;
use crate::prompt::GenerationPrompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use vouch_domain::traits::{
    Embedding, EmbeddingProvider, Generation, GenerationOptions, GenerativeProvider,
    ProviderError,
};
use vouch_domain::{EvidenceChunk, TokenUsage};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for provider requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Embedding dimension of the default Ollama embedding models
pub const DEFAULT_DIMENSIONS: usize = 768;

/// Ollama API client implementing both provider traits.
pub struct OllamaClient {
    endpoint: String,
    model: String,
    dimensions: usize,
    client: reqwest::Client,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: &'static str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Serialize)]
struct EmbeddingsRequest {
    model: String,
    prompt: String,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

impl OllamaClient {
    /// Create a client for the given endpoint and model
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_timeout(endpoint, model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            dimensions: DEFAULT_DIMENSIONS,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the embedding dimension advertised by this client
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// POST a JSON body, retrying transient failures with exponential
    /// backoff (1s, 2s, 4s, ...). A 404 means the model is missing and is
    /// not retried.
    async fn post_with_retries<Req: Serialize, Resp: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Resp, ProviderError> {
        let url = format!("{}{}", self.endpoint, path);

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.json::<Resp>().await.map_err(|e| {
                            ProviderError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))
                        });
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(ProviderError::ModelNotAvailable(self.model.clone()));
                    } else if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ProviderError::RateLimitExceeded);
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(ProviderError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error =
                        Some(ProviderError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(attempt = attempts, ?delay, "provider call failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| ProviderError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError> {
        let request = EmbeddingsRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response: EmbeddingsResponse =
            self.post_with_retries("/api/embeddings", &request).await?;

        if response.embedding.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "empty embedding vector".to_string(),
            ));
        }

        debug!(model = %self.model, dims = response.embedding.len(), "embedded text");

        // Ollama's embeddings endpoint reports no token counts; approximate
        // with whitespace words so usage accounting stays monotonic.
        let token_count = text.split_whitespace().count() as u32;

        Ok(Embedding {
            dimensions: response.embedding.len(),
            vector: response.embedding,
            token_count,
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait]
impl GenerativeProvider for OllamaClient {
    async fn generate(
        &self,
        question: &str,
        evidence: &[EvidenceChunk],
        options: &GenerationOptions,
    ) -> Result<Generation, ProviderError> {
        let prompt = GenerationPrompt::new(question, evidence)
            .with_options(options)
            .build();

        debug!(model = %self.model, prompt_len = prompt.len(), "requesting generation");

        let request = GenerateRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
            format: "json",
        };

        let response: GenerateResponse = self.post_with_retries("/api/generate", &request).await?;

        let (answer, claims) = parse_generation_payload(&response.response)?;

        debug!(model = %self.model, claims = claims.len(), "generation parsed");

        Ok(Generation {
            answer,
            claims,
            token_usage: TokenUsage {
                prompt_tokens: response.prompt_eval_count,
                completion_tokens: response.eval_count,
            },
        })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new(DEFAULT_ENDPOINT, "llama3").unwrap();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model, "llama3");
        assert_eq!(client.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_builder_overrides() {
        let client = OllamaClient::new(DEFAULT_ENDPOINT, "llama3")
            .unwrap()
            .with_max_retries(1)
            .with_dimensions(384);
        assert_eq!(client.max_retries, 1);
        assert_eq!(client.dimensions, 384);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_communication_error() {
        let client = OllamaClient::new("http://127.0.0.1:1", "llama3")
            .unwrap()
            .with_max_retries(1);

        let result = EmbeddingProvider::embed(&client, "test").await;
        assert!(matches!(result, Err(ProviderError::Communication(_))));
    }

    // Integration test; requires a running Ollama instance
    #[tokio::test]
    #[ignore]
    async fn test_embed_integration() {
        let client = OllamaClient::new(DEFAULT_ENDPOINT, "nomic-embed-text").unwrap();
        let embedding = EmbeddingProvider::embed(&client, "hello world").await;
        if let Ok(embedding) = embedding {
            assert!(!embedding.vector.is_empty());
        }
    }
}
