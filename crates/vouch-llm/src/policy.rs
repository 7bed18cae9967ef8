//! Model selection policy

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One selection rule.
///
/// `None` fields are wildcards; a rule matches when every populated field
/// equals the request's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Tenant the rule applies to, or any tenant
    #[serde(default)]
    pub tenant: Option<String>,

    /// Task class the rule applies to (e.g. "rag_strict"), or any
    #[serde(default)]
    pub task_class: Option<String>,

    /// Persona the rule applies to, or any
    #[serde(default)]
    pub persona: Option<String>,

    /// Model selected when the rule matches
    pub model: String,
}

impl PolicyRule {
    fn matches(&self, tenant: &str, task_class: &str, persona: Option<&str>) -> bool {
        let tenant_ok = self.tenant.as_deref().map_or(true, |t| t == tenant);
        let task_ok = self.task_class.as_deref().map_or(true, |t| t == task_class);
        let persona_ok = self.persona.as_deref().map_or(true, |p| Some(p) == persona);
        tenant_ok && task_ok && persona_ok
    }
}

/// Ordered model-selection rule list with a fallback.
///
/// Selection walks the rules in order and returns the first match; the
/// fallback model covers requests no rule matches. This is configuration
/// dispatch, not decision logic: the orchestrator consults it once per
/// request before touching the providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelPolicy {
    /// Rules in priority order
    #[serde(default)]
    pub rules: Vec<PolicyRule>,

    /// Model used when no rule matches
    pub fallback: String,
}

impl ModelPolicy {
    /// Create a policy with no rules, always selecting the fallback
    pub fn fallback_only(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }

    /// Select the model for a request
    pub fn select(&self, tenant: &str, task_class: &str, persona: Option<&str>) -> &str {
        for rule in &self.rules {
            if rule.matches(tenant, task_class, persona) {
                debug!(tenant, task_class, model = %rule.model, "policy rule matched");
                return &rule.model;
            }
        }
        debug!(tenant, task_class, model = %self.fallback, "policy fallback");
        &self.fallback
    }
}
