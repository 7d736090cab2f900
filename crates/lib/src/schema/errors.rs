//! Error types for schema lookup, conversion and validation.

use thiserror::Error;

/// Boxed error returned by user-supplied converters and validators
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Structured error types for the schema engine.
///
/// Every variant records the path (relative to the converted or validated root) at which the
/// failure happened and a description of the schema node involved.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A value could not be coerced into the shape a schema node describes
    #[error("convert: cannot convert {value} to {schema} at '{path}': {reason}")]
    ConversionFailed {
        path: String,
        schema: String,
        value: String,
        reason: String,
    },

    /// A custom converter attached to a schema node failed
    #[error("convert: custom converter for {schema} failed at '{path}': {source}")]
    ConverterFailed {
        path: String,
        schema: String,
        #[source]
        source: BoxError,
    },

    /// A value does not match the schema node describing its location
    #[error("validate: {value} does not match {schema} at '{path}': {reason}")]
    ValidationFailed {
        path: String,
        schema: String,
        value: String,
        reason: String,
    },

    /// A custom validator attached to a schema node rejected a value
    #[error("validate: custom validator for {schema} rejected {value} at '{path}': {source}")]
    ValidatorFailed {
        path: String,
        schema: String,
        value: String,
        #[source]
        source: BoxError,
    },

    /// A string could not be decoded as a self-describing encoding
    #[error("convert: cannot decode {value} at '{path}': {source}")]
    DeserializationFailed {
        path: String,
        value: String,
        #[source]
        source: serde_json::Error,
    },

    /// A path does not lead to any node of a schema
    #[error("schema_at_path: no schema at '{path}' in {schema}: {reason}")]
    SchemaPath {
        path: String,
        schema: String,
        reason: String,
    },
}

impl SchemaError {
    /// Check if this error is a conversion failure, built-in or custom
    pub fn is_conversion_error(&self) -> bool {
        matches!(
            self,
            SchemaError::ConversionFailed { .. } | SchemaError::ConverterFailed { .. }
        )
    }

    /// Check if this error is a validation failure, built-in or custom
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            SchemaError::ValidationFailed { .. } | SchemaError::ValidatorFailed { .. }
        )
    }

    /// Check if this error came from decoding a string
    pub fn is_deserialization_error(&self) -> bool {
        matches!(self, SchemaError::DeserializationFailed { .. })
    }

    /// Check if this error is a schema lookup failure
    pub fn is_schema_path_error(&self) -> bool {
        matches!(self, SchemaError::SchemaPath { .. })
    }

    /// Get the operation that raised this error
    pub fn operation(&self) -> &'static str {
        match self {
            SchemaError::ConversionFailed { .. }
            | SchemaError::ConverterFailed { .. }
            | SchemaError::DeserializationFailed { .. } => "convert",
            SchemaError::ValidationFailed { .. } | SchemaError::ValidatorFailed { .. } => {
                "validate"
            }
            SchemaError::SchemaPath { .. } => "schema_at_path",
        }
    }

    /// Get the path at which the failure happened
    pub fn path(&self) -> &str {
        match self {
            SchemaError::ConversionFailed { path, .. }
            | SchemaError::ConverterFailed { path, .. }
            | SchemaError::ValidationFailed { path, .. }
            | SchemaError::ValidatorFailed { path, .. }
            | SchemaError::DeserializationFailed { path, .. }
            | SchemaError::SchemaPath { path, .. } => path,
        }
    }
}

// Conversion from SchemaError to the main Error type
impl From<SchemaError> for crate::Error {
    fn from(err: SchemaError) -> Self {
        crate::Error::Schema(err)
    }
}
