//! Error types for path parsing.

use thiserror::Error;

/// Structured error types for path parsing.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// A segment of the path is malformed
    #[error("Invalid path segment '{segment}' in '{path}': {reason}")]
    InvalidSegment {
        path: String,
        segment: String,
        reason: String,
    },

    /// Brackets or quotes are not balanced
    #[error("Unbalanced '{delimiter}' in path '{path}'")]
    Unbalanced { path: String, delimiter: char },
}

impl PathError {
    pub(crate) fn invalid_segment(
        path: impl Into<String>,
        segment: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PathError::InvalidSegment {
            path: path.into(),
            segment: segment.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error reports a malformed segment.
    ///
    /// Unbalanced delimiters count as malformed segments too.
    pub fn is_invalid_segment(&self) -> bool {
        matches!(
            self,
            PathError::InvalidSegment { .. } | PathError::Unbalanced { .. }
        )
    }

    /// Get the full path text that failed to parse
    pub fn path(&self) -> &str {
        match self {
            PathError::InvalidSegment { path, .. } | PathError::Unbalanced { path, .. } => path,
        }
    }

    /// Get the offending segment text, if known
    pub fn segment(&self) -> Option<&str> {
        match self {
            PathError::InvalidSegment { segment, .. } => Some(segment),
            PathError::Unbalanced { .. } => None,
        }
    }
}

// Conversion from PathError to the main Error type
impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}
