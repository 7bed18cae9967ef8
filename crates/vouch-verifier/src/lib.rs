//! Vouch Verifier
//!
//! Deterministic claim verification and reliability scoring. Given the
//! claims a generator produced and the evidence chunks it was shown, this
//! crate computes a per-claim reliability score (URS), assigns a letter
//! grade, partitions claims into verified and blocked, and derives the
//! aggregate verification status.
//!
//! The whole crate is pure and side-effect-free: identical inputs always
//! produce identical outputs. It decides whether a claim is reliable enough
//! to surface, not whether it is true.

#![warn(missing_docs)]

pub mod score;
mod verifier;

pub use verifier::{VerificationReport, Verifier};
