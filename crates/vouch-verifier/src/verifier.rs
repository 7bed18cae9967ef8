//! Claim gating and aggregate status

use crate::score::{score_claim, BLOCK_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use vouch_domain::{
    Claim, EvidenceChunk, ReliabilityLabel, SourceRef, VerificationStatus, VerifiedClaim,
};

/// Outcome of verifying one claim set.
///
/// Serializable so reports can be attached to audit records downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Claims that passed the gate (urs >= 0.5)
    pub verified_claims: Vec<VerifiedClaim>,

    /// Claims the gate removed (urs < 0.5)
    pub blocked_claims: Vec<VerifiedClaim>,

    /// Mean urs over verified claims; 0.0 when that set is empty
    pub avg_urs: f64,

    /// Aggregate verdict derived from the partition alone
    pub status: VerificationStatus,
}

/// Scores and gates claims against the evidence they cite.
///
/// Pure and side-effect-free; holds no state beyond its existence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verifier;

impl Verifier {
    /// Create a verifier
    pub fn new() -> Self {
        Self
    }

    /// Verify a claim set against the evidence chunks of the same
    /// pipeline invocation.
    ///
    /// The lookup uses the exact 1-based ordinal numbering the retriever
    /// produced for this call. A claim citing an ordinal id absent from the
    /// evidence set resolves to no source reference for that id; the claim
    /// is still scored on its remaining signals rather than failing the
    /// request.
    pub fn verify(&self, claims: &[Claim], chunks: &[EvidenceChunk]) -> VerificationReport {
        let by_ordinal: HashMap<String, &EvidenceChunk> = chunks
            .iter()
            .map(|chunk| (chunk.ordinal_id(), chunk))
            .collect();

        let mut verified_claims = Vec::new();
        let mut blocked_claims = Vec::new();

        for claim in claims {
            let (urs, breakdown) = score_claim(claim);
            let label = ReliabilityLabel::from_score(urs);
            let sources = resolve_sources(claim, &by_ordinal);
            let reason = describe(claim, urs, &sources);

            debug!(urs, label = %label, text = %claim.text, "claim scored");

            let verdict = VerifiedClaim {
                claim: claim.clone(),
                urs,
                label,
                reason,
                breakdown,
                sources,
            };

            if urs < BLOCK_THRESHOLD {
                blocked_claims.push(verdict);
            } else {
                verified_claims.push(verdict);
            }
        }

        let avg_urs = if verified_claims.is_empty() {
            0.0
        } else {
            verified_claims.iter().map(|claim| claim.urs).sum::<f64>()
                / verified_claims.len() as f64
        };

        let status = aggregate_status(verified_claims.len(), blocked_claims.len());

        VerificationReport {
            verified_claims,
            blocked_claims,
            avg_urs,
            status,
        }
    }
}

/// Resolve cited ordinal ids into source references.
///
/// Unmatched ids silently yield nothing.
fn resolve_sources(
    claim: &Claim,
    by_ordinal: &HashMap<String, &EvidenceChunk>,
) -> Vec<SourceRef> {
    claim
        .source_ids
        .iter()
        .filter_map(|ordinal_id| by_ordinal.get(ordinal_id))
        .map(|chunk| chunk.source.clone())
        .collect()
}

/// Aggregate status over the verified/blocked partition.
///
/// SAFE with zero blocked; WARNING when blocked is a minority; BLOCKED
/// otherwise. NO_DATA is the orchestrator's, assigned when there were no
/// claims at all.
fn aggregate_status(verified: usize, blocked: usize) -> VerificationStatus {
    let total = verified + blocked;
    if blocked == 0 {
        VerificationStatus::Safe
    } else if blocked * 2 < total {
        VerificationStatus::Warning
    } else {
        VerificationStatus::Blocked
    }
}

fn describe(claim: &Claim, urs: f64, sources: &[SourceRef]) -> String {
    if claim.source_ids.is_empty() {
        format!("no cited sources (urs {:.2})", urs)
    } else if sources.is_empty() {
        format!(
            "{} citation(s), none resolvable in this evidence set (urs {:.2})",
            claim.source_ids.len(),
            urs
        )
    } else if claim.is_inference {
        format!(
            "inference over {} resolved source(s) (urs {:.2})",
            sources.len(),
            urs
        )
    } else {
        format!("grounded in {} resolved source(s) (urs {:.2})", sources.len(), urs)
    }
}
