//! Classification result produced once per question

use crate::Intent;
use serde::{Deserialize, Serialize};

/// Result of classifying a question.
///
/// Produced exactly once per question by the classifier and consumed by the
/// router. `confidence` is always in [0, 1]; anything below 0.5 forces the
/// router to block regardless of intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Detected intent
    pub intent: Intent,

    /// Confidence in the detected intent, in [0, 1]
    pub confidence: f64,

    /// Free-form retrieval hints attached by the matching pattern entry
    /// (e.g. "order_by_recency" for temporal questions)
    #[serde(default)]
    pub constraints: Vec<String>,
}

impl Classification {
    /// Create a classification with no constraints
    pub fn new(intent: Intent, confidence: f64) -> Self {
        Self {
            intent,
            confidence,
            constraints: Vec::new(),
        }
    }

    /// The fallback classification for text no pattern recognizes.
    ///
    /// Confidence sits at the lowest tier so the router blocks the question.
    pub fn unknown() -> Self {
        Self::new(Intent::Unknown, 0.40)
    }
}
