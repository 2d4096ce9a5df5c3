//! Error types and the diagnostics carried in conversion results.
//!
//! Malformed input never produces an `Err` from a conversion; it produces
//! [`Diagnostic`]s alongside best-effort output. The error enums cover the
//! conditions that genuinely stop work: unparseable rule patterns at
//! registration time and `Invalid` reaching a writer (a programming error).

use crate::kinds::BlockKind;

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Returned by rule callbacks to signal a recoverable per-match failure.
/// The reader emits the consumed lines unchanged and records a diagnostic.
#[derive(thiserror::Error, Debug)]
pub enum CallbackError {
    #[error("missing capture group `{0}`")]
    MissingCapture(&'static str),

    #[error("unterminated block: no closing `{0}` before end of input")]
    Unterminated(String),

    #[error("{0}")]
    Other(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ConversionError {
    /// `Invalid` was dispatched to a writer. Readers filter it before
    /// dispatch, so hitting this means a rule table was built by hand
    /// incorrectly.
    #[error("the Invalid block kind cannot be rendered")]
    InvalidKindDispatched,
}

/// A recoverable problem found during a conversion pass, reported to the
/// caller rather than aborting. `line` is 1-based; 0 means the problem is
/// not tied to a source line (e.g. tags left open at end of input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: Option<BlockKind>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: usize, kind: Option<BlockKind>, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}
