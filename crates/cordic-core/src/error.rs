//! CORDIC engine error types

use thiserror::Error;

/// Result type for engine construction and accuracy scoring
pub type CordicResult<T> = Result<T, CordicError>;

/// Errors raised while configuring or scoring the CORDIC engine
///
/// Evaluation itself is total: every well-formed input sample produces
/// exactly one output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CordicError {
    /// Iteration count outside the supported range
    #[error("Iteration count {requested} outside supported range {min}..={max}")]
    InvalidIterations {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// Outputs do not pair one-to-one with the inputs being scored
    #[error("Length mismatch: {expected} inputs, {actual} outputs")]
    LengthMismatch { expected: usize, actual: usize },
}
