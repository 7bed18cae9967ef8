//! The orchestrator's published result type

use crate::{RoutingDecision, SourceRef, VerificationStatus, VerifiedClaim};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for one query-processing invocation, based on UUIDv7.
///
/// Chronologically sortable, so pipeline telemetry orders by creation time
/// without extra bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u128);

impl RequestId {
    /// Generate a new UUIDv7-based RequestId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a RequestId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl Serialize for RequestId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RequestId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        uuid::Uuid::parse_str(&s)
            .map(|u| Self(u.as_u128()))
            .map_err(serde::de::Error::custom)
    }
}

/// Token accounting reported by the providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt (question + evidence)
    pub prompt_tokens: u32,

    /// Tokens produced by the generator
    pub completion_tokens: u32,
}

impl TokenUsage {
    /// Total tokens for the request
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Why a run ended with nothing to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoResultsReason {
    /// Retrieval returned zero usable chunks
    NoEvidence,

    /// The generative step produced zero claims
    NoClaims,
}

/// A fully processed, gated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnswer {
    /// The generated answer text
    pub answer: String,

    /// Claims that passed the reliability gate
    pub verified_claims: Vec<VerifiedClaim>,

    /// Claims the gate removed (urs < 0.5)
    pub blocked_claims: Vec<VerifiedClaim>,

    /// Mean urs over `verified_claims`; 0.0 when that set is empty
    pub avg_urs: f64,

    /// Aggregate verdict derived from the verified/blocked partition
    pub verification_status: VerificationStatus,

    /// Deduplicated source references of the verified claims
    pub citations: Vec<SourceRef>,

    /// Model that produced the answer
    pub model_used: String,

    /// Token accounting across embedding and generation
    pub token_usage: TokenUsage,

    /// Identifier of this invocation
    pub request_id: RequestId,
}

/// Result of processing one query.
///
/// A tagged union so the illegal combinations (a SAFE status with no claims,
/// a blocked question carrying an answer) cannot be constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The full pipeline ran and produced a gated answer
    Answered(QueryAnswer),

    /// Retrieval or generation produced nothing usable. A normal outcome,
    /// not an error; the verification status is NO_DATA by definition.
    NoResults {
        /// What came up empty
        reason: NoResultsReason,

        /// Model selected for the request, when selection happened before
        /// the pipeline ran dry
        model_used: Option<String>,
    },

    /// The router did not send the question to generation (a block, or the
    /// inert direct-answer path)
    Refused {
        /// The routing decision that stopped the pipeline
        decision: RoutingDecision,
    },
}

impl QueryOutcome {
    /// The aggregate verification status the caller observes
    pub fn verification_status(&self) -> VerificationStatus {
        match self {
            QueryOutcome::Answered(answer) => answer.verification_status,
            QueryOutcome::NoResults { .. } => VerificationStatus::NoData,
            QueryOutcome::Refused { .. } => VerificationStatus::Blocked,
        }
    }
}
