//! Error types for the dynamic value model.

use thiserror::Error;

/// Structured error types for value conversions and value-level operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ValueError {
    /// A value did not have the expected kind
    #[error("Value type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// A length-changing operation was attempted on a fixed-length list
    #[error("Fixed-length list of {len} elements cannot change length")]
    FixedLength { len: usize },

    /// JSON text could not be decoded into a value
    #[error("Failed to decode value from JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

impl ValueError {
    /// Check if this error is a kind mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, ValueError::TypeMismatch { .. })
    }

    /// Check if this error came from a fixed-length list
    pub fn is_fixed_length(&self) -> bool {
        matches!(self, ValueError::FixedLength { .. })
    }

    /// Check if this error is a decoding failure
    pub fn is_decode_error(&self) -> bool {
        matches!(self, ValueError::Decode { .. })
    }
}

// Conversion from ValueError to the main Error type
impl From<ValueError> for crate::Error {
    fn from(err: ValueError) -> Self {
        crate::Error::Value(err)
    }
}
