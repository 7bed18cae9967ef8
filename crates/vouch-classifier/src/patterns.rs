//! Pattern tables for the classification cascade
//!
//! Tiers and fragments are plain data, independently testable and
//! extensible. The default table carries the bilingual (Italian/English)
//! phrasing of the corpus it was tuned on.

use vouch_domain::Intent;

/// Confidence tier for a set of literal fragments.
///
/// Tiers are evaluated from `High` down; the first tier with a match wins
/// and its confidence is returned unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternTier {
    /// Unambiguous phrasing (0.95)
    High,
    /// Strong phrasing with rare false positives (0.85)
    MediumHigh,
    /// Common phrasing (0.70)
    Medium,
    /// Weak, generic phrasing (0.55)
    MediumLow,
    /// Barely indicative fragments; also the no-match default (0.40)
    Low,
}

impl PatternTier {
    /// The confidence value this tier assigns
    pub fn confidence(&self) -> f64 {
        match self {
            PatternTier::High => 0.95,
            PatternTier::MediumHigh => 0.85,
            PatternTier::Medium => 0.70,
            PatternTier::MediumLow => 0.55,
            PatternTier::Low => 0.40,
        }
    }

    /// All tiers in evaluation order, highest first
    pub fn ordered() -> [PatternTier; 5] {
        [
            PatternTier::High,
            PatternTier::MediumHigh,
            PatternTier::Medium,
            PatternTier::MediumLow,
            PatternTier::Low,
        ]
    }
}

/// Fragments for one intent within one tier.
#[derive(Debug, Clone)]
pub struct IntentPatterns {
    /// The intent these fragments indicate
    pub intent: Intent,

    /// Literal lowercase fragments tested by substring containment
    pub fragments: Vec<&'static str>,

    /// Retrieval hints attached to the classification on a match
    pub constraints: Vec<&'static str>,
}

impl IntentPatterns {
    /// Create a pattern entry with no constraints
    pub fn new(intent: Intent, fragments: Vec<&'static str>) -> Self {
        Self {
            intent,
            fragments,
            constraints: Vec::new(),
        }
    }

    /// Attach retrieval hints emitted when this entry matches
    pub fn with_constraints(mut self, constraints: Vec<&'static str>) -> Self {
        self.constraints = constraints;
        self
    }
}

/// One tier's worth of pattern entries.
#[derive(Debug, Clone)]
pub struct TierPatterns {
    /// The tier these entries share
    pub tier: PatternTier,

    /// Entries in declaration order; within a tier the first matching
    /// intent wins
    pub entries: Vec<IntentPatterns>,
}

/// The full ordered cascade, highest tier first.
///
/// An explicitly constructed value, injected into the classifier. Tier
/// precedence is fixed by construction; within-tier intent order is the
/// declaration order below and carries no further tie-breaking.
#[derive(Debug, Clone)]
pub struct PatternTable {
    /// Tiers in evaluation order
    pub tiers: Vec<TierPatterns>,
}

impl Default for PatternTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                TierPatterns {
                    tier: PatternTier::High,
                    entries: vec![
                        IntentPatterns::new(
                            Intent::Blocked,
                            vec![
                                "ignore previous instructions",
                                "ignora le istruzioni precedenti",
                                "system prompt",
                                "jailbreak",
                            ],
                        ),
                        IntentPatterns::new(
                            Intent::Personal,
                            vec!["mi chiamo", "il mio nome è", "my name is"],
                        ),
                        IntentPatterns::new(
                            Intent::FactCheck,
                            vec!["è vero che", "is it true that", "fact check"],
                        ),
                        IntentPatterns::new(
                            Intent::Numerical,
                            vec!["quanto costa", "quanti sono", "how much does", "how many"],
                        )
                        .with_constraints(vec!["prefer_exact_figures"]),
                        IntentPatterns::new(
                            Intent::Definition,
                            vec!["che cos'è", "cosa significa", "what does", "define "],
                        ),
                        IntentPatterns::new(
                            Intent::Procedure,
                            vec!["come si fa", "how do i", "step by step", "passo passo"],
                        ),
                        IntentPatterns::new(
                            Intent::Temporal,
                            vec!["in che anno", "in quale anno", "what year", "when did"],
                        )
                        .with_constraints(vec!["order_by_recency"]),
                        IntentPatterns::new(
                            Intent::Spatial,
                            vec!["dove si trova", "where is", "in quale città"],
                        ),
                        IntentPatterns::new(
                            Intent::Comparison,
                            vec!["differenza tra", "difference between", "meglio di"],
                        ),
                        IntentPatterns::new(
                            Intent::Interpretation,
                            vec!["cosa ne pensi", "what do you think", "secondo te"],
                        ),
                        IntentPatterns::new(
                            Intent::Generative,
                            vec!["scrivi una", "scrivi un", "write a poem", "write a story"],
                        ),
                    ],
                },
                TierPatterns {
                    tier: PatternTier::MediumHigh,
                    entries: vec![
                        IntentPatterns::new(
                            Intent::FactCheck,
                            vec!["davvero", "confermi che", "verify that", "is it correct"],
                        ),
                        IntentPatterns::new(
                            Intent::Numerical,
                            vec!["quanto", "quanti", "quante", "how much", "percentuale"],
                        )
                        .with_constraints(vec!["prefer_exact_figures"]),
                        IntentPatterns::new(
                            Intent::Comparison,
                            vec!["rispetto a", "compared to", "versus", " vs "],
                        ),
                        IntentPatterns::new(
                            Intent::Procedure,
                            vec!["come posso", "how can i", "how to", "istruzioni per"],
                        ),
                        IntentPatterns::new(
                            Intent::Temporal,
                            vec!["quando", "da quando", "until when", "fino a quando"],
                        )
                        .with_constraints(vec!["order_by_recency"]),
                        IntentPatterns::new(Intent::Spatial, vec!["dove", "vicino a", "near "]),
                        IntentPatterns::new(
                            Intent::Generative,
                            vec!["scrivi", "componi", "inventa", "compose", "genera"],
                        ),
                        IntentPatterns::new(
                            Intent::Interpretation,
                            vec!["la tua opinione", "your opinion", "interpreta"],
                        ),
                    ],
                },
                TierPatterns {
                    tier: PatternTier::Medium,
                    entries: vec![
                        IntentPatterns::new(
                            Intent::Definition,
                            vec!["cos'è", "what is", "what are", "significato di"],
                        ),
                        IntentPatterns::new(
                            Intent::Conversational,
                            vec!["come stai", "how are you", "buongiorno", "good morning"],
                        ),
                        IntentPatterns::new(
                            Intent::Personal,
                            vec!["mi piace", "i like", "i prefer", "preferisco"],
                        ),
                        IntentPatterns::new(
                            Intent::Temporal,
                            vec!["che anno", "what time", "a che ora"],
                        ),
                    ],
                },
                TierPatterns {
                    tier: PatternTier::MediumLow,
                    entries: vec![
                        IntentPatterns::new(
                            Intent::Conversational,
                            vec!["ciao", "hello", "salve", "grazie", "thanks"],
                        ),
                        IntentPatterns::new(
                            Intent::FactCheck,
                            vec!["vero", "true", "falso", "false"],
                        ),
                    ],
                },
                TierPatterns {
                    tier: PatternTier::Low,
                    entries: vec![IntentPatterns::new(
                        Intent::Definition,
                        vec!["perché", "why", "spiegami", "explain"],
                    )],
                },
            ],
        }
    }
}
