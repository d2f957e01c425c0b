//! Error handling for GcodePlay
//!
//! The interpreter itself never fails a run: per-line problems become
//! diagnostics in the output, not `Err` values. The error type here is
//! the single source of diagnostic message text, and the only fallible
//! surface is configuration.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code interpretation error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Arc motion line that carries none of the I, J, or R words
    #[error("Arc move missing I, J, or R parameters")]
    MissingArcParameters {
        /// 0-based index of the offending source line.
        line_index: usize,
    },

    /// Tessellation resolution that cannot subdivide an arc
    #[error("Invalid tessellation resolution {value}: must be a positive length")]
    InvalidTessellation {
        /// The rejected resolution value.
        value: f64,
    },
}

impl GcodeError {
    /// Source line this error is attached to, when it refers to one
    pub fn line_index(&self) -> Option<usize> {
        match self {
            GcodeError::MissingArcParameters { line_index } => Some(*line_index),
            GcodeError::InvalidTessellation { .. } => None,
        }
    }

    /// Check if this error is recoverable as a per-line diagnostic
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, GcodeError::MissingArcParameters { .. })
    }
}

/// Result type using GcodeError
pub type Result<T> = std::result::Result<T, GcodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Downstream editors match on this exact text to underline arc lines.
    #[test]
    fn test_missing_arc_parameters_message() {
        let err = GcodeError::MissingArcParameters { line_index: 7 };
        assert_eq!(err.to_string(), "Arc move missing I, J, or R parameters");
        assert_eq!(err.line_index(), Some(7));
        assert!(err.is_diagnostic());
    }

    #[test]
    fn test_invalid_tessellation_is_not_a_diagnostic() {
        let err = GcodeError::InvalidTessellation { value: -0.5 };
        assert!(!err.is_diagnostic());
        assert_eq!(err.line_index(), None);
    }
}
