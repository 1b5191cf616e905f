//! Error types for structure operations and runs
//!
//! Every condition here is recoverable: the operation that raised it is
//! aborted without mutating anything and the session keeps going. Misses
//! (search/delete of an absent key) and duplicate tree inserts are ordinary
//! outcomes and are deliberately not represented here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Input could not be turned into a key, value or item
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// Removal requested from a structure with no elements
    #[error("Cannot {operation} from empty {structure}")]
    EmptyStructure {
        structure: &'static str,
        operation: &'static str,
    },

    /// Linear-probing insert found no free slot
    #[error("Hash table is full: all {size} slots are occupied")]
    StructureFull { size: usize },

    /// Configuration value outside its supported range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl EngineError {
    pub fn invalid_input(input: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Parse a whole-number key or value typed by the user
pub fn parse_number(input: &str) -> Result<i64, EngineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input(input, "expected a number"));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| EngineError::invalid_input(input, "not a whole number"))
}
