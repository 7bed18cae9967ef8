//! Claims and their verification results

use crate::SourceRef;
use serde::{Deserialize, Serialize};

/// An atomic assertion produced by the generative collaborator.
///
/// `source_ids` carry the `chunk_N` ordinal ids handed to the generator in
/// the same pipeline invocation; they resolve against that retrieval call
/// only. The optional quality signals override the scorer's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// The asserted statement
    pub text: String,

    /// Ordinal ids of the evidence chunks this claim cites
    #[serde(default)]
    pub source_ids: Vec<String>,

    /// True when the claim is an inference over evidence rather than a
    /// restatement of it
    #[serde(default)]
    pub is_inference: bool,

    /// Extraction quality override in [0, 1]; scorer default is 0.9
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor_quality: Option<f64>,

    /// Date coherence override in [0, 1]; scorer default is 1.0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_coherence: Option<f64>,

    /// True when the claim draws on an out-of-tenant or external source
    #[serde(default)]
    pub out_of_domain: bool,
}

impl Claim {
    /// Create a claim citing the given ordinal ids
    pub fn new(text: impl Into<String>, source_ids: Vec<String>) -> Self {
        Self {
            text: text.into(),
            source_ids,
            is_inference: false,
            extractor_quality: None,
            date_coherence: None,
            out_of_domain: false,
        }
    }
}

/// Letter grade derived from the reliability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReliabilityLabel {
    /// urs >= 0.85
    A,
    /// urs >= 0.70
    B,
    /// urs >= 0.50
    C,
    /// urs < 0.50 (always blocked)
    X,
}

impl ReliabilityLabel {
    /// Map a reliability score to its letter grade
    pub fn from_score(urs: f64) -> Self {
        if urs >= 0.85 {
            ReliabilityLabel::A
        } else if urs >= 0.70 {
            ReliabilityLabel::B
        } else if urs >= 0.50 {
            ReliabilityLabel::C
        } else {
            ReliabilityLabel::X
        }
    }
}

impl std::fmt::Display for ReliabilityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ReliabilityLabel::A => "A",
            ReliabilityLabel::B => "B",
            ReliabilityLabel::C => "C",
            ReliabilityLabel::X => "X",
        };
        write!(f, "{}", s)
    }
}

/// The five weighted sub-scores behind a reliability score.
///
/// All components are in [0, 1]. The weighted sum is the URS; the weights
/// live in the verifier crate next to the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 1.0 sourced, 0.7 sourced inference, 0.0 unsourced
    pub coverage: f64,

    /// Weight by citation count: 0 -> 0.0, 1 -> 0.6, 2 -> 0.8, >=3 -> 1.0
    pub reference_score: f64,

    /// Extraction quality signal (default 0.9)
    pub extractor_quality: f64,

    /// Date coherence signal (default 1.0)
    pub date_coherence: f64,

    /// 1.0 in-domain, 0.5 when the claim draws on external sources
    pub domain_factor: f64,
}

/// A claim plus its reliability verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedClaim {
    /// The claim as produced by the generator
    pub claim: Claim,

    /// Reliability score in [0, 1]
    pub urs: f64,

    /// Letter grade for the score
    pub label: ReliabilityLabel,

    /// Human-readable scoring summary
    pub reason: String,

    /// The sub-scores the urs was computed from
    pub breakdown: ScoreBreakdown,

    /// Source references resolved from the cited ordinal ids.
    /// Unmatched ids resolve to nothing rather than an error.
    pub sources: Vec<SourceRef>,
}

/// Aggregate verdict over one claim set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    /// No claim was blocked
    Safe,

    /// Fewer than half the claims were blocked
    Warning,

    /// Half or more of the claims were blocked
    Blocked,

    /// No claims were produced at all (assigned by the orchestrator)
    NoData,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VerificationStatus::Safe => "SAFE",
            VerificationStatus::Warning => "WARNING",
            VerificationStatus::Blocked => "BLOCKED",
            VerificationStatus::NoData => "NO_DATA",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_thresholds() {
        assert_eq!(ReliabilityLabel::from_score(0.98), ReliabilityLabel::A);
        assert_eq!(ReliabilityLabel::from_score(0.85), ReliabilityLabel::A);
        assert_eq!(ReliabilityLabel::from_score(0.84), ReliabilityLabel::B);
        assert_eq!(ReliabilityLabel::from_score(0.70), ReliabilityLabel::B);
        assert_eq!(ReliabilityLabel::from_score(0.69), ReliabilityLabel::C);
        assert_eq!(ReliabilityLabel::from_score(0.50), ReliabilityLabel::C);
        assert_eq!(ReliabilityLabel::from_score(0.49), ReliabilityLabel::X);
        assert_eq!(ReliabilityLabel::from_score(0.0), ReliabilityLabel::X);
    }

    #[test]
    fn test_claim_deserializes_with_defaults() {
        let claim: Claim = serde_json::from_str(r#"{"text": "The sky is blue"}"#).unwrap();
        assert!(claim.source_ids.is_empty());
        assert!(!claim.is_inference);
        assert_eq!(claim.extractor_quality, None);
        assert_eq!(claim.date_coherence, None);
        assert!(!claim.out_of_domain);
    }
}
