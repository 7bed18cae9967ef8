//! Vouch Router
//!
//! Deterministic intent-to-action gate sitting between the classifier and
//! the rest of the pipeline. A static table maps each intent to one of three
//! actions; a confidence floor overrides everything else. The router never
//! guesses: anything it does not recognize is blocked.
//!
//! # Examples
//!
//! ```
//! use vouch_router::Router;
//! use vouch_domain::{Classification, Intent, RouteAction};
//!
//! let router = Router::new();
//! let classification = Classification::new(Intent::Definition, 0.95);
//! let decision = router.route(&classification, "what is photosynthesis?", "t1");
//! assert_eq!(decision.action, RouteAction::RagStrict);
//! ```

#![warn(missing_docs)]

mod router;

pub use router::{Router, MIN_ROUTABLE_CONFIDENCE};
