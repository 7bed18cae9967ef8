//! Vouch Classifier
//!
//! Turns raw question text into a [`Classification`] using a cascading
//! pattern-confidence scheme: literal phrase fragments are grouped into
//! confidence tiers, and the highest tier with a match wins. Literal
//! specificity beats generic phrasing by construction, not by any learned
//! signal.
//!
//! Unrecognized text never errors; it degrades to the lowest-confidence
//! default, which forces the router to block.
//!
//! # Examples
//!
//! ```
//! use vouch_classifier::Classifier;
//! use vouch_domain::Intent;
//!
//! let classifier = Classifier::default();
//! let c = classifier.classify("Quanto costa il biglietto?");
//! assert_eq!(c.intent, Intent::Numerical);
//! ```

#![warn(missing_docs)]

mod classifier;
mod patterns;

pub use classifier::Classifier;
pub use patterns::{IntentPatterns, PatternTable, PatternTier, TierPatterns};
