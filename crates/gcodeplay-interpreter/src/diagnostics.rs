//! Per-line validation diagnostics
//!
//! Diagnostics are recoverable by definition: a line that fails
//! validation contributes no segment, and interpretation continues with
//! the next line. The run as a whole always completes.

use gcodeplay_core::GcodeError;
use serde::{Deserialize, Serialize};

/// One validation failure attached to a source line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 0-based index of the offending line
    pub line_index: usize,
    /// Human-readable failure description
    pub message: String,
}

impl Diagnostic {
    /// Build a diagnostic from a recoverable interpreter error
    pub fn from_error(error: &GcodeError) -> Self {
        debug_assert!(error.is_diagnostic(), "{error} is not a per-line error");
        Self {
            line_index: error.line_index().unwrap_or(0),
            message: error.to_string(),
        }
    }
}
