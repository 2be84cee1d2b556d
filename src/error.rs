//! Error types for the engine.
//!
//! Absence of matches or recommendations is never an error here; it is an
//! empty result. The only faults surfaced to callers are contract
//! violations on their side.

use thiserror::Error;

/// Errors that can occur in the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `recommend` was asked for zero suggestions. "No results" is an empty
    /// list, never a count of zero requested up front, so this is a caller
    /// bug and fails fast.
    #[error("recommendation count must be at least 1, got {0}")]
    InvalidRecommendationCount(usize),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
