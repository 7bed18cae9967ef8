//! The reliability score formula
//!
//! URS is a weighted sum of five sub-scores. The weights sum to 1.0, every
//! sub-score is in [0, 1], so the total is always in [0, 1]. The weights and
//! the per-component rules below are the semantics of the gate; they are
//! constants, not configuration.

use vouch_domain::{Claim, ScoreBreakdown};

/// Weight of the coverage sub-score
pub const COVERAGE_WEIGHT: f64 = 0.30;

/// Weight of the reference-count sub-score
pub const REFERENCE_WEIGHT: f64 = 0.25;

/// Weight of the extractor-quality sub-score
pub const EXTRACTOR_WEIGHT: f64 = 0.20;

/// Weight of the date-coherence sub-score
pub const DATE_WEIGHT: f64 = 0.15;

/// Weight of the domain-locality sub-score
pub const DOMAIN_WEIGHT: f64 = 0.10;

/// Claims scoring below this are always blocked
pub const BLOCK_THRESHOLD: f64 = 0.5;

/// Default extractor quality when the claim carries no override
pub const DEFAULT_EXTRACTOR_QUALITY: f64 = 0.9;

/// Default date coherence when the claim carries no override
pub const DEFAULT_DATE_COHERENCE: f64 = 1.0;

/// Compute the sub-scores for a claim.
///
/// - coverage: 1.0 sourced, 0.7 sourced but marked inference, 0.0 unsourced
/// - reference score: 0 sources 0.0, 1 source 0.6, 2 sources 0.8, three or
///   more 1.0
/// - extractor quality / date coherence: claim overrides clamped to [0, 1],
///   else the defaults
/// - domain factor: 0.5 when the claim draws on out-of-tenant sources,
///   else 1.0
pub fn breakdown(claim: &Claim) -> ScoreBreakdown {
    let source_count = claim.source_ids.len();

    let coverage = if source_count == 0 {
        0.0
    } else if claim.is_inference {
        0.7
    } else {
        1.0
    };

    let reference_score = match source_count {
        0 => 0.0,
        1 => 0.6,
        2 => 0.8,
        _ => 1.0,
    };

    let extractor_quality = claim
        .extractor_quality
        .unwrap_or(DEFAULT_EXTRACTOR_QUALITY)
        .clamp(0.0, 1.0);

    let date_coherence = claim
        .date_coherence
        .unwrap_or(DEFAULT_DATE_COHERENCE)
        .clamp(0.0, 1.0);

    let domain_factor = if claim.out_of_domain { 0.5 } else { 1.0 };

    ScoreBreakdown {
        coverage,
        reference_score,
        extractor_quality,
        date_coherence,
        domain_factor,
    }
}

/// The weighted sum over a breakdown.
pub fn urs(breakdown: &ScoreBreakdown) -> f64 {
    COVERAGE_WEIGHT * breakdown.coverage
        + REFERENCE_WEIGHT * breakdown.reference_score
        + EXTRACTOR_WEIGHT * breakdown.extractor_quality
        + DATE_WEIGHT * breakdown.date_coherence
        + DOMAIN_WEIGHT * breakdown.domain_factor
}

/// Score a claim in one step.
pub fn score_claim(claim: &Claim) -> (f64, ScoreBreakdown) {
    let parts = breakdown(claim);
    (urs(&parts), parts)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_claim() -> impl Strategy<Value = Claim> {
        (
            0usize..6,
            any::<bool>(),
            proptest::option::of(0.0f64..=1.0),
            proptest::option::of(0.0f64..=1.0),
            any::<bool>(),
        )
            .prop_map(|(sources, is_inference, quality, coherence, out_of_domain)| {
                let mut claim = Claim::new(
                    "claim",
                    (1..=sources).map(|i| format!("chunk_{}", i)).collect(),
                );
                claim.is_inference = is_inference;
                claim.extractor_quality = quality;
                claim.date_coherence = coherence;
                claim.out_of_domain = out_of_domain;
                claim
            })
    }

    proptest! {
        /// Property: URS is always in [0, 1]
        #[test]
        fn test_urs_bounds(claim in arbitrary_claim()) {
            let (urs, _) = score_claim(&claim);
            prop_assert!((0.0..=1.0).contains(&urs), "urs {} out of range", urs);
        }

        /// Property: more sources never lower the score, all else fixed
        #[test]
        fn test_monotone_in_source_count(claim in arbitrary_claim()) {
            let (base, _) = score_claim(&claim);

            let mut more = claim.clone();
            more.source_ids.push(format!("chunk_{}", more.source_ids.len() + 1));
            let (grown, _) = score_claim(&more);

            prop_assert!(grown >= base - 1e-12);
        }

        /// Property: staying in-domain never lowers the score
        #[test]
        fn test_monotone_in_domain(claim in arbitrary_claim()) {
            let mut inside = claim.clone();
            inside.out_of_domain = false;
            let mut outside = claim;
            outside.out_of_domain = true;

            let (inside_urs, _) = score_claim(&inside);
            let (outside_urs, _) = score_claim(&outside);
            prop_assert!(inside_urs >= outside_urs);
        }

        /// Property: higher quality signals never lower the score
        #[test]
        fn test_monotone_in_quality(
            claim in arbitrary_claim(),
            low in 0.0f64..=1.0,
            delta in 0.0f64..=1.0,
        ) {
            let high = (low + delta).min(1.0);

            let mut with_low = claim.clone();
            with_low.extractor_quality = Some(low);
            let mut with_high = claim;
            with_high.extractor_quality = Some(high);

            let (low_urs, _) = score_claim(&with_low);
            let (high_urs, _) = score_claim(&with_high);
            prop_assert!(high_urs >= low_urs - 1e-12);
        }

        /// Property: recomputation never changes the result
        #[test]
        fn test_determinism(claim in arbitrary_claim()) {
            let (first, first_parts) = score_claim(&claim);
            let (second, second_parts) = score_claim(&claim);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first_parts, second_parts);
        }
    }
}
