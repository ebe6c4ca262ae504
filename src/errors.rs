//! Typed errors for the intent resolution engine.

use thiserror::Error;

/// Errors surfaced by the intent resolution engine.
///
/// `NotFound` is a legitimate resolution outcome (the catalog is empty, a
/// descriptor vanished between retrieval and selection, or the score floor
/// rejected the best candidate). Index and provider failures are distinct
/// variants and are never collapsed into an empty result.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No capability matched the request.
    #[error("no capability matched the request")]
    NotFound,

    /// The embedding index has not been built yet, or the last rebuild
    /// never completed successfully.
    #[error("embedding index unavailable: {reason}")]
    IndexUnavailable {
        /// Why the index cannot serve queries.
        reason: String,
    },

    /// The embedding/query step exceeded the configured time bound.
    #[error("resolution timed out after {elapsed_ms} ms")]
    Timeout {
        /// The bound that was exceeded, in milliseconds.
        elapsed_ms: u64,
    },

    /// The embedding provider failed.
    #[error("embedding provider error: {message}")]
    Embedding {
        /// What the provider reported.
        message: String,
    },
}

impl ResolveError {
    /// True when the error means "nothing matched" rather than an
    /// infrastructure failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::NotFound)
    }
}
