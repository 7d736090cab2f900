//! Error types for path traversal.

use thiserror::Error;

use crate::path::{JsonPath, PathSegment};
use crate::value::Value;

/// Structured error types for Get, Set, Delete and ForEach.
///
/// Every variant records the operation that raised it, the resolved path up to the failing
/// location, and a short snapshot of the value found there.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalkError {
    /// A path segment cannot be applied to the kind of value it reached
    #[error("{operation}: segment '{segment}' is invalid at '{path}' for {value}: {reason}")]
    SegmentInvalid {
        operation: &'static str,
        path: String,
        segment: String,
        value: String,
        reason: String,
    },

    /// The value at a location is missing or unusable
    #[error("{operation}: value at '{path}' is invalid ({value}): {reason}")]
    ValueAtPathInvalid {
        operation: &'static str,
        path: String,
        value: String,
        reason: String,
    },
}

impl WalkError {
    pub(crate) fn segment_invalid(
        operation: &'static str,
        here: &JsonPath,
        segment: &PathSegment,
        value: &Value,
        reason: impl Into<String>,
    ) -> Self {
        WalkError::SegmentInvalid {
            operation,
            path: here.render(),
            segment: segment.to_string(),
            value: value.snapshot(),
            reason: reason.into(),
        }
    }

    pub(crate) fn value_invalid(
        operation: &'static str,
        here: &JsonPath,
        value: &Value,
        reason: impl Into<String>,
    ) -> Self {
        WalkError::ValueAtPathInvalid {
            operation,
            path: here.render(),
            value: value.snapshot(),
            reason: reason.into(),
        }
    }

    /// Check if a segment was inapplicable to the value it reached
    pub fn is_segment_invalid(&self) -> bool {
        matches!(self, WalkError::SegmentInvalid { .. })
    }

    /// Check if a value was missing or unusable
    pub fn is_value_invalid(&self) -> bool {
        matches!(self, WalkError::ValueAtPathInvalid { .. })
    }

    /// Get the operation that raised this error
    pub fn operation(&self) -> &'static str {
        match self {
            WalkError::SegmentInvalid { operation, .. }
            | WalkError::ValueAtPathInvalid { operation, .. } => operation,
        }
    }

    /// Get the path resolved up to the failure
    pub fn path(&self) -> &str {
        match self {
            WalkError::SegmentInvalid { path, .. } | WalkError::ValueAtPathInvalid { path, .. } => {
                path
            }
        }
    }

    /// Get the snapshot of the value found at the failing location
    pub fn value(&self) -> &str {
        match self {
            WalkError::SegmentInvalid { value, .. }
            | WalkError::ValueAtPathInvalid { value, .. } => value,
        }
    }
}

// Conversion from WalkError to the main Error type
impl From<WalkError> for crate::Error {
    fn from(err: WalkError) -> Self {
        crate::Error::Walk(err)
    }
}
