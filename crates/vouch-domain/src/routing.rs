//! Routing decision derived from a classification

use serde::{Deserialize, Serialize};

/// What the pipeline is allowed to do with a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteAction {
    /// Answer without AI generation.
    ///
    /// Stated limitation: no direct-answer logic exists yet, so the
    /// orchestrator returns a no-op result for this action. The variant is
    /// kept so the contract does not change when that logic lands.
    DirectQuery,

    /// Proceed with retrieval-grounded generation under strict claim gating
    RagStrict,

    /// Refuse the question outright
    Block,
}

impl RouteAction {
    /// Get the action name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteAction::DirectQuery => "direct_query",
            RouteAction::RagStrict => "rag_strict",
            RouteAction::Block => "block",
        }
    }
}

impl std::fmt::Display for RouteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Deterministic routing verdict for one question.
///
/// Derived from a [`Classification`](crate::Classification) by a static
/// table plus a confidence override; never persisted independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// The gated action
    pub action: RouteAction,

    /// Human-readable reason for the decision
    pub reason: String,

    /// True iff `action` is [`RouteAction::RagStrict`]
    pub requires_generation: bool,

    /// True iff `action` is [`RouteAction::DirectQuery`]
    pub can_answer_directly: bool,
}

impl RoutingDecision {
    /// Build a decision, deriving the two flags from the action
    pub fn new(action: RouteAction, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
            requires_generation: action == RouteAction::RagStrict,
            can_answer_directly: action == RouteAction::DirectQuery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_derived_from_action() {
        let d = RoutingDecision::new(RouteAction::RagStrict, "ok");
        assert!(d.requires_generation);
        assert!(!d.can_answer_directly);

        let d = RoutingDecision::new(RouteAction::DirectQuery, "ok");
        assert!(!d.requires_generation);
        assert!(d.can_answer_directly);

        let d = RoutingDecision::new(RouteAction::Block, "no");
        assert!(!d.requires_generation);
        assert!(!d.can_answer_directly);
    }
}
