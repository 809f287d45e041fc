//! Error taxonomy for the witness-persistence pipeline
//!
//! Every stage validates its inputs on entry and reports failures through
//! [`TdaError`]. Parameter and input errors are surfaced to the caller without
//! partial results; nothing is retried, since a pure in-memory pipeline has no
//! transient conditions.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TdaError>;

/// Failures raised by the pipeline stages and their I/O collaborators.
#[derive(Debug, Error)]
pub enum TdaError {
    /// An out-of-range or nonsensical numeric argument.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// The point cloud has no points.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// The point-cloud source could not be parsed.
    #[error("malformed input{}: {reason}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedInput {
        /// 1-based source line, when the failure is tied to one.
        line: Option<usize>,
        /// Human-readable explanation.
        reason: String,
    },

    /// A filtration violates its structural invariants.
    ///
    /// The witness builder guarantees these invariants, so this is raised only
    /// for hand-built filtrations or construction bugs.
    #[error("malformed filtration: {0}")]
    MalformedFiltration(String),

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration document could not be decoded or encoded.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl TdaError {
    /// Shorthand for [`TdaError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`TdaError::MalformedInput`] tied to a source line.
    pub fn malformed_at(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: Some(line),
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`TdaError::MalformedInput`] not tied to a line.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            line: None,
            reason: reason.into(),
        }
    }

    /// Stable short name of the failure kind, used by the entry point.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidParameter { .. } => "InvalidParameter",
            Self::EmptyInput(_) => "EmptyInput",
            Self::MalformedInput { .. } => "MalformedInput",
            Self::MalformedFiltration(_) => "MalformedFiltration",
            Self::Io { .. } => "Io",
            Self::Config(_) => "Config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_includes_line() {
        let err = TdaError::malformed_at(7, "expected 3 columns, found 2");
        assert_eq!(
            err.to_string(),
            "malformed input at line 7: expected 3 columns, found 2"
        );
        assert_eq!(err.kind(), "MalformedInput");
    }

    #[test]
    fn test_invalid_parameter_message() {
        let err = TdaError::invalid("num_divisions", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `num_divisions`: must be at least 1"
        );
        assert_eq!(err.kind(), "InvalidParameter");
    }
}
