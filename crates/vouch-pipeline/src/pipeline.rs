//! The query-processing orchestrator

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};
use vouch_classifier::Classifier;
use vouch_domain::traits::{ChunkFilter, DocumentStore, GenerationOptions};
use vouch_domain::{
    NoResultsReason, QueryAnswer, QueryOutcome, RequestId, RouteAction, SourceRef, TokenUsage,
    VerificationStatus,
};
use vouch_llm::{ModelPolicy, ProviderResolver};
use vouch_retriever::Retriever;
use vouch_router::Router;
use vouch_verifier::Verifier;

/// One question to process.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    /// The question text
    pub question: String,

    /// Tenant whose corpus may be consulted
    pub tenant_id: String,

    /// Persona hint forwarded to model selection and generation
    pub persona: Option<String>,

    /// Explicit model override; bypasses the policy lookup
    pub model: Option<String>,

    /// Precomputed query embedding; skips the embedding call when present
    pub query_embedding: Option<Vec<f32>>,

    /// Restrict retrieval to one source document
    pub source_filter: Option<String>,

    /// Log per-claim score breakdowns at info level
    pub debug: bool,
}

impl QueryRequest {
    /// Create a request with defaults for the optional fields
    pub fn new(question: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            tenant_id: tenant_id.into(),
            persona: None,
            model: None,
            query_embedding: None,
            source_filter: None,
            debug: false,
        }
    }

    /// Set the persona hint
    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.persona = Some(persona.into());
        self
    }

    /// Override the model selection
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Supply a precomputed query embedding
    pub fn with_query_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.query_embedding = Some(embedding);
        self
    }
}

/// Sequences Classifier, Router, Retriever, generation and Verifier for
/// each request.
///
/// Stateless across requests: collaborators are injected once and shared;
/// nothing here persists between invocations. Dropping the returned future
/// cancels the in-flight provider call.
pub struct Pipeline<S: DocumentStore> {
    classifier: Classifier,
    router: Router,
    retriever: Retriever<S>,
    verifier: Verifier,
    resolver: Arc<dyn ProviderResolver>,
    policy: ModelPolicy,
    config: PipelineConfig,
}

impl<S: DocumentStore> Pipeline<S> {
    /// Assemble a pipeline from its collaborators
    pub fn new(
        classifier: Classifier,
        store: Arc<S>,
        resolver: Arc<dyn ProviderResolver>,
        config: PipelineConfig,
    ) -> Self {
        let policy = config.policy.clone();
        Self {
            classifier,
            router: Router::new(),
            retriever: Retriever::new(store),
            verifier: Verifier::new(),
            resolver,
            policy,
            config,
        }
    }

    /// Process one question into a gated, attributed outcome.
    ///
    /// Degraded data comes back as [`QueryOutcome::NoResults`]; a routing
    /// refusal as [`QueryOutcome::Refused`]; a failing collaborator as an
    /// error. The outcome's status never contradicts its claim set.
    pub async fn process_query(
        &self,
        request: QueryRequest,
    ) -> Result<QueryOutcome, PipelineError> {
        let request_id = RequestId::new();
        info!(%request_id, tenant = %request.tenant_id, "processing query");

        // Stage 1: classification (synchronous, never fails)
        let classification = self.classifier.classify(&request.question);
        debug!(
            intent = %classification.intent,
            confidence = classification.confidence,
            "classified"
        );

        // Stage 2: routing gate
        let decision = self
            .router
            .route(&classification, &request.question, &request.tenant_id);
        if decision.action != RouteAction::RagStrict {
            info!(action = %decision.action, reason = %decision.reason, "not routed to generation");
            return Ok(QueryOutcome::Refused { decision });
        }

        // Stage 3: model selection (explicit override beats the policy)
        let model = match &request.model {
            Some(model) => model.clone(),
            None => self
                .policy
                .select(
                    &request.tenant_id,
                    decision.action.as_str(),
                    request.persona.as_deref(),
                )
                .to_string(),
        };
        let providers = self.resolver.resolve(&model).await?;

        // Stage 4: query embedding (skipped when precomputed)
        let (query_embedding, embed_tokens) = match request.query_embedding.clone() {
            Some(embedding) => (embedding, 0),
            None => {
                let embedding = providers.embedder.embed(&request.question).await?;
                (embedding.vector, embedding.token_count)
            }
        };

        // Stage 5: evidence retrieval
        let filter = ChunkFilter {
            source_id: request.source_filter.clone(),
        };
        let chunks = self
            .retriever
            .retrieve(
                &query_embedding,
                &request.tenant_id,
                self.config.retrieval.into(),
                &filter,
            )
            .await?;

        if chunks.is_empty() {
            info!(%request_id, "no usable evidence");
            return Ok(QueryOutcome::NoResults {
                reason: NoResultsReason::NoEvidence,
                model_used: Some(model),
            });
        }

        // Stage 6: grounded generation
        let options = GenerationOptions {
            persona: request.persona.clone(),
            constraints: classification.constraints.clone(),
        };
        let generation = timeout(
            self.config.generation.timeout(),
            providers.generator.generate(&request.question, &chunks, &options),
        )
        .await
        .map_err(|_| PipelineError::Timeout)??;

        if generation.claims.is_empty() {
            info!(%request_id, "generation produced no claims");
            return Ok(QueryOutcome::NoResults {
                reason: NoResultsReason::NoClaims,
                model_used: Some(model),
            });
        }

        // Stage 7: verification and gating
        let report = self.verifier.verify(&generation.claims, &chunks);
        if request.debug {
            for claim in report.verified_claims.iter().chain(&report.blocked_claims) {
                info!(
                    urs = claim.urs,
                    label = %claim.label,
                    breakdown = ?claim.breakdown,
                    text = %claim.claim.text,
                    "claim scored"
                );
            }
        }

        info!(
            %request_id,
            verified = report.verified_claims.len(),
            blocked = report.blocked_claims.len(),
            avg_urs = report.avg_urs,
            status = %report.status,
            "verification complete"
        );

        let citations = dedup_citations(&report.verified_claims);
        let status = report.status;
        debug_assert!(
            status != VerificationStatus::Safe || report.blocked_claims.is_empty(),
            "status must follow the partition"
        );

        Ok(QueryOutcome::Answered(QueryAnswer {
            answer: generation.answer,
            verified_claims: report.verified_claims,
            blocked_claims: report.blocked_claims,
            avg_urs: report.avg_urs,
            verification_status: status,
            citations,
            model_used: model,
            token_usage: TokenUsage {
                prompt_tokens: generation.token_usage.prompt_tokens + embed_tokens,
                completion_tokens: generation.token_usage.completion_tokens,
            },
            request_id,
        }))
    }
}

/// Unique source references of the verified claims, in first-seen order.
fn dedup_citations(verified: &[vouch_domain::VerifiedClaim]) -> Vec<SourceRef> {
    let mut seen = std::collections::HashSet::new();
    let mut citations = Vec::new();
    for claim in verified {
        for source in &claim.sources {
            if seen.insert(source.source_id.clone()) {
                citations.push(source.clone());
            }
        }
    }
    citations
}
