//! Cascade evaluation

use crate::patterns::PatternTable;
use tracing::debug;
use vouch_domain::Classification;

/// Classifies questions by walking the pattern cascade tier by tier.
///
/// The table is injected at construction; the classifier itself holds no
/// other state and never errors.
#[derive(Debug, Clone)]
pub struct Classifier {
    table: PatternTable,
}

impl Classifier {
    /// Create a classifier over the given pattern table
    pub fn new(table: PatternTable) -> Self {
        Self { table }
    }

    /// Classify a question.
    ///
    /// The text is lowercased once and tested for substring containment
    /// against every fragment of the current tier; the first tier with at
    /// least one match wins and its confidence is returned immediately.
    /// Higher tiers always beat lower tiers even when both match. Multiple
    /// matches within one tier use the tier confidence once; the first
    /// matching intent in declaration order wins.
    ///
    /// Text no fragment recognizes degrades to the unknown default, whose
    /// confidence forces a block downstream.
    pub fn classify(&self, question: &str) -> Classification {
        let haystack = question.to_lowercase();

        for tier in &self.table.tiers {
            for entry in &tier.entries {
                if let Some(fragment) = entry
                    .fragments
                    .iter()
                    .find(|fragment| haystack.contains(*fragment))
                {
                    debug!(
                        intent = %entry.intent,
                        confidence = tier.tier.confidence(),
                        fragment,
                        "pattern matched"
                    );
                    let mut classification =
                        Classification::new(entry.intent, tier.tier.confidence());
                    classification.constraints =
                        entry.constraints.iter().map(|c| c.to_string()).collect();
                    return classification;
                }
            }
        }

        debug!("no pattern matched, degrading to unknown");
        Classification::unknown()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(PatternTable::default())
    }
}
