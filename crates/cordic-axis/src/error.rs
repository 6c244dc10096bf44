//! Streaming core error types

use std::io;
use thiserror::Error;

use cordic_core::CordicError;

/// Result type for streaming operations
pub type AxisResult<T> = Result<T, AxisError>;

/// Errors that can occur around the streaming core
///
/// The core itself never fails once a beat is accepted. These errors cover
/// malformed framing on the way in, configuration, and testbench runs that
/// do not complete.
#[derive(Error, Debug)]
pub enum AxisError {
    /// Byte buffer cannot be split into 16-bit words
    #[error("Frame length {0} is odd; expected whole 16-bit words")]
    OddLength(usize),

    /// Word count does not divide into complete beats
    #[error("Frame holds {words} words, not a multiple of {lanes} lanes per beat")]
    LaneMismatch { words: usize, lanes: usize },

    /// Testbench run did not drain within the tick budget
    #[error("Stream did not drain after {ticks} ticks ({pending} beats outstanding)")]
    Timeout { ticks: u64, pending: usize },

    /// Invalid idle/backpressure pattern
    #[error("Invalid pause pattern: {0}")]
    InvalidPattern(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Engine construction failed
    #[error("CORDIC engine: {0}")]
    Core(#[from] CordicError),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AxisError {
    /// Check if this error comes from malformed input framing
    pub fn is_framing_error(&self) -> bool {
        matches!(
            self,
            AxisError::OddLength(_) | AxisError::LaneMismatch { .. }
        )
    }

    /// Check if retrying with a larger tick budget could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AxisError::Timeout { .. })
    }
}
