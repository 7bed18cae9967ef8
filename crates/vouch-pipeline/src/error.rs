//! Pipeline error types

use thiserror::Error;
use vouch_domain::traits::ProviderError;
use vouch_retriever::RetrieverError;

/// Errors that abort a query.
///
/// Degraded-data conditions are not here on purpose: an empty corpus or an
/// empty claim set is a [`QueryOutcome`](vouch_domain::QueryOutcome), so a
/// caller can always distinguish "nothing to say" from "something broke".
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An embedding or generation provider failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Retrieval failed (including document store errors)
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrieverError),

    /// The generation call exceeded the configured timeout
    #[error("Generation timed out")]
    Timeout,

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(String),
}
