//! Deterministic mock providers for testing

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};
use vouch_domain::traits::{
    Embedding, EmbeddingProvider, Generation, GenerationOptions, GenerativeProvider,
    ProviderError,
};
use vouch_domain::{Claim, EvidenceChunk, TokenUsage};

/// Hash-based deterministic embedding provider.
///
/// Same text always produces the same unit-length vector, different texts
/// produce different vectors. No network calls, no model files; enough to
/// exercise the full retrieval pipeline in tests and demos.
#[derive(Debug, Clone)]
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    /// Create a mock embedding provider with the given dimension
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        text.hash(&mut hasher);
        let h = hasher.finish();
        // Map to [-1, 1]
        (h as f64 / u64::MAX as f64 * 2.0 - 1.0) as f32
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError> {
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "cannot embed empty text".to_string(),
            ));
        }

        let mut vector: Vec<f32> = (0..self.dimension)
            .map(|i| Self::hash_with_seed(text, i as u64))
            .collect();

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut vector {
                *x /= norm;
            }
        }

        Ok(Embedding {
            dimensions: self.dimension,
            vector,
            token_count: text.split_whitespace().count() as u32,
        })
    }

    fn dimensions(&self) -> usize {
        self.dimension
    }
}

/// Scripted generative provider.
///
/// Three behaviours cover the pipeline's branches: echo the evidence back
/// as one claim per chunk, return a fixed generation, or fail.
#[derive(Clone)]
pub struct MockGenerativeProvider {
    model: String,
    behaviour: Behaviour,
    call_count: Arc<Mutex<usize>>,
}

#[derive(Clone)]
enum Behaviour {
    EchoEvidence,
    Scripted(Generation),
    Failing,
}

impl MockGenerativeProvider {
    /// Produce one claim per evidence chunk, each citing that chunk
    pub fn echo_evidence() -> Self {
        Self {
            model: "mock-echo".to_string(),
            behaviour: Behaviour::EchoEvidence,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always return the given generation
    pub fn scripted(generation: Generation) -> Self {
        Self {
            model: "mock-scripted".to_string(),
            behaviour: Behaviour::Scripted(generation),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always fail with a communication error
    pub fn failing() -> Self {
        Self {
            model: "mock-failing".to_string(),
            behaviour: Behaviour::Failing,
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of generate calls made against this mock
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl GenerativeProvider for MockGenerativeProvider {
    async fn generate(
        &self,
        question: &str,
        evidence: &[EvidenceChunk],
        _options: &GenerationOptions,
    ) -> Result<Generation, ProviderError> {
        *self.call_count.lock().unwrap() += 1;

        match &self.behaviour {
            Behaviour::EchoEvidence => {
                let claims: Vec<Claim> = evidence
                    .iter()
                    .map(|chunk| Claim::new(chunk.text.clone(), vec![chunk.ordinal_id()]))
                    .collect();

                let answer = if claims.is_empty() {
                    String::new()
                } else {
                    format!(
                        "Based on {} source(s): {}",
                        claims.len(),
                        evidence
                            .iter()
                            .map(|c| c.text.as_str())
                            .collect::<Vec<_>>()
                            .join(" ")
                    )
                };

                Ok(Generation {
                    answer,
                    claims,
                    token_usage: TokenUsage {
                        prompt_tokens: question.split_whitespace().count() as u32,
                        completion_tokens: 16,
                    },
                })
            }
            Behaviour::Scripted(generation) => Ok(generation.clone()),
            Behaviour::Failing => Err(ProviderError::Communication(
                "mock provider configured to fail".to_string(),
            )),
        }
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_domain::SourceRef;

    fn chunk(ordinal: usize, text: &str) -> EvidenceChunk {
        EvidenceChunk {
            ordinal,
            text: text.to_string(),
            embedding: vec![0.0; 4],
            similarity: 0.9,
            source: SourceRef::new("doc-1"),
            tenant_id: "t1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_embedding_is_deterministic() {
        let provider = MockEmbeddingProvider::new(64);
        let a = provider.embed("the sky is blue").await.unwrap();
        let b = provider.embed("the sky is blue").await.unwrap();
        assert_eq!(a.vector, b.vector);
    }

    #[tokio::test]
    async fn test_mock_embedding_is_normalized() {
        let provider = MockEmbeddingProvider::new(64);
        let embedding = provider.embed("some text").await.unwrap();
        let norm: f32 = embedding.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_mock_embedding_differs_across_texts() {
        let provider = MockEmbeddingProvider::new(64);
        let a = provider.embed("first").await.unwrap();
        let b = provider.embed("second").await.unwrap();
        assert_ne!(a.vector, b.vector);
    }

    #[tokio::test]
    async fn test_echo_evidence_cites_each_chunk() {
        let provider = MockGenerativeProvider::echo_evidence();
        let evidence = vec![chunk(1, "fact one"), chunk(2, "fact two")];

        let generation = provider
            .generate("question", &evidence, &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(generation.claims.len(), 2);
        assert_eq!(generation.claims[0].source_ids, vec!["chunk_1"]);
        assert_eq!(generation.claims[1].source_ids, vec!["chunk_2"]);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let provider = MockGenerativeProvider::failing();
        let result = provider
            .generate("q", &[], &GenerationOptions::default())
            .await;
        assert!(matches!(result, Err(ProviderError::Communication(_))));
    }
}
