//! Error taxonomy for record-backed operations.
//!
//! The algorithmic core is total and never fails; only input validation and
//! store access can. Degraded fallbacks (a temporarily unreachable global
//! correction store) are deliberately *not* errors: the resolver logs them
//! and falls through to the next source.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed caller input: empty word, zero cut positions, cut indices
    /// outside the word. Rejected before any record is touched.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A correction request id that does not exist.
    #[error("correction request {0} not found")]
    NotFound(u64),

    /// A pending correction request already exists for this (word, requester)
    /// pair. The caller should reuse the existing request.
    #[error("pending correction request for \"{word}\" already filed by {requester}")]
    Conflict { word: String, requester: String },

    /// The backing store failed outright on a write path.
    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
