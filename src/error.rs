//! Engine error taxonomy.

use thiserror::Error;

/// Errors surfaced by frame access, registration and evaluation.
///
/// The scanner never lets one of these abort a batch: failures are caught
/// per (symbol, strategy) pair and recorded as run diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A strategy read a column that was never written.
    #[error("column '{0}' not found in frame")]
    MissingColumn(String),

    /// A column exists but holds the other value kind.
    #[error("column '{0}' has the wrong type for this access")]
    ColumnType(String),

    /// A written column does not line up with the frame's bar count.
    #[error("column '{column}' has length {actual}, frame expects {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Registration under a display name that is already taken.
    #[error("strategy '{0}' is already registered")]
    DuplicateStrategy(String),

    /// A parameter override failed validation.
    #[error("invalid parameter '{name}': {reason}")]
    BadParameter { name: String, reason: String },
}
