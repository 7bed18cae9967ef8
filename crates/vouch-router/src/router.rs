//! The routing table and confidence gate

use tracing::debug;
use vouch_domain::{Classification, Intent, RouteAction, RoutingDecision};

/// Classifications below this confidence are blocked regardless of intent.
pub const MIN_ROUTABLE_CONFIDENCE: f64 = 0.5;

/// Deterministic intent-to-action gate.
///
/// The table is fixed: changing it changes the safety semantics of the
/// whole pipeline, so it is code, not configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Router;

impl Router {
    /// Create a router
    pub fn new() -> Self {
        Self
    }

    /// Derive the routing decision for a classification.
    ///
    /// The question and tenant flow through for telemetry only; the
    /// decision is a pure function of intent and confidence. The confidence
    /// floor is checked first: below [`MIN_ROUTABLE_CONFIDENCE`] the action
    /// is a block with a low-confidence reason, irrespective of what the
    /// table would say.
    pub fn route(
        &self,
        classification: &Classification,
        question: &str,
        tenant_id: &str,
    ) -> RoutingDecision {
        if classification.confidence < MIN_ROUTABLE_CONFIDENCE {
            let decision = RoutingDecision::new(
                RouteAction::Block,
                format!(
                    "classification confidence {:.2} below routable minimum {:.2}",
                    classification.confidence, MIN_ROUTABLE_CONFIDENCE
                ),
            );
            debug!(
                tenant_id,
                question_len = question.len(),
                intent = %classification.intent,
                reason = %decision.reason,
                "blocked"
            );
            return decision;
        }

        let (action, reason) = Self::table_entry(classification.intent);
        let decision = RoutingDecision::new(action, reason);
        debug!(
            tenant_id,
            question_len = question.len(),
            intent = %classification.intent,
            action = %decision.action,
            "routed"
        );
        decision
    }

    /// The static table row for an intent.
    ///
    /// Exposed for table-level tests; [`Router::route`] applies the
    /// confidence override on top of this.
    pub fn table_entry(intent: Intent) -> (RouteAction, &'static str) {
        match intent {
            Intent::FactCheck
            | Intent::Numerical
            | Intent::Comparison
            | Intent::Definition
            | Intent::Procedure
            | Intent::Temporal
            | Intent::Spatial => (
                RouteAction::RagStrict,
                "grounded generation over tenant evidence",
            ),
            // The direct path carries no implementation yet; the
            // orchestrator returns a no-op result for it.
            Intent::Personal | Intent::Conversational => (
                RouteAction::DirectQuery,
                "answerable without generation",
            ),
            Intent::Interpretation | Intent::Generative => (
                RouteAction::Block,
                "open-ended interpretation is not grounded in evidence",
            ),
            Intent::Blocked => (RouteAction::Block, "classified as disallowed input"),
            Intent::Unknown => (RouteAction::Block, "unknown intent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evidence_intents_route_to_rag_strict() {
        let router = Router::new();
        for intent in [
            Intent::FactCheck,
            Intent::Numerical,
            Intent::Comparison,
            Intent::Definition,
            Intent::Procedure,
            Intent::Temporal,
            Intent::Spatial,
        ] {
            let decision = router.route(&Classification::new(intent, 0.95), "q", "t1");
            assert_eq!(decision.action, RouteAction::RagStrict, "{}", intent);
            assert!(decision.requires_generation);
            assert!(!decision.can_answer_directly);
        }
    }

    #[test]
    fn test_direct_intents() {
        let router = Router::new();
        for intent in [Intent::Personal, Intent::Conversational] {
            let decision = router.route(&Classification::new(intent, 0.95), "q", "t1");
            assert_eq!(decision.action, RouteAction::DirectQuery, "{}", intent);
            assert!(!decision.requires_generation);
            assert!(decision.can_answer_directly);
        }
    }

    #[test]
    fn test_open_ended_intents_block_unconditionally() {
        let router = Router::new();
        for intent in [Intent::Interpretation, Intent::Generative, Intent::Blocked] {
            let decision = router.route(&Classification::new(intent, 0.99), "q", "t1");
            assert_eq!(decision.action, RouteAction::Block, "{}", intent);
        }
    }

    #[test]
    fn test_unknown_intent_blocks_with_reason() {
        let router = Router::new();
        let decision = router.route(&Classification::new(Intent::Unknown, 0.9), "q", "t1");
        assert_eq!(decision.action, RouteAction::Block);
        assert!(decision.reason.contains("unknown intent"));
    }

    #[test]
    fn test_low_confidence_overrides_any_intent() {
        let router = Router::new();
        for intent in [
            Intent::FactCheck,
            Intent::Definition,
            Intent::Personal,
            Intent::Interpretation,
        ] {
            let decision = router.route(&Classification::new(intent, 0.3), "q", "t1");
            assert_eq!(decision.action, RouteAction::Block, "{}", intent);
            assert!(
                decision.reason.contains("confidence"),
                "reason must cite low confidence, got '{}'",
                decision.reason
            );
            assert!(!decision.reason.contains("unknown intent"));
        }
    }

    #[test]
    fn test_confidence_boundary() {
        let router = Router::new();
        // Exactly 0.5 is routable
        let decision = router.route(&Classification::new(Intent::FactCheck, 0.5), "q", "t1");
        assert_eq!(decision.action, RouteAction::RagStrict);

        let decision = router.route(&Classification::new(Intent::FactCheck, 0.4999), "q", "t1");
        assert_eq!(decision.action, RouteAction::Block);
    }
}
