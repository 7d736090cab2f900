//!
//! dynpath: query, mutate, convert and validate nested dynamic values with JSONPath-like paths.
//!
//! ## Core Concepts
//!
//! * **Values (`value::Value`)**: The dynamic data model. Scalars, growable and fixed-length lists,
//!   insertion-ordered maps, named records with per-field visibility and mutability, and references.
//! * **Paths (`path::JsonPath`)**: A parsed path is a sequence of recursive-descent groups. The first
//!   group applies to the root; every later group is reached through `..` and searched for anywhere
//!   below the previous match. Supported selectors are `$`, `.key`, `['key']`, `[index]`, `[*]`,
//!   `['a','b',3]` and `[start:end:step]`.
//! * **Traversal (`walk`)**: [`get`], [`set`], [`delete`] and [`for_each`] walk a path over a value.
//!   Set creates missing structure on the way down, optionally shaped by a schema.
//! * **Schemas (`schema::Schema`)**: Runtime type descriptors. [`convert`] coerces loosely-typed data
//!   into the described shape, [`validate_data`] checks it without coercion, and
//!   [`get_schema_at_path`] finds the node describing a location.
//! * **Equality (`equal::are_equal`)**: Structural comparison with float tolerance and overrides.
//!
//! ```
//! use dynpath::value::Value;
//!
//! let mut doc = Value::from_json_str(r#"{"store": {"book": [{"title": "A"}, {"title": "B"}]}}"#)?;
//! assert_eq!(dynpath::get(&doc, "$.store.book[1].title")?, "B");
//!
//! let written = dynpath::set(&mut doc, "$.store.book[*].price", Value::from(10))?;
//! assert_eq!(written, 2);
//! assert_eq!(dynpath::get(&doc, "$..price")?.to_json_string(), "[10,10]");
//! # Ok::<(), dynpath::Error>(())
//! ```

pub mod equal;
pub mod path;
pub mod schema;
pub mod value;
pub mod walk;

pub use equal::{EqualityOptions, are_equal};
pub use path::{JsonPath, parse};
pub use schema::{
    DynamicSchema, DynamicSchemaNode, Schema, UnionMatch, convert, convert_union,
    get_schema_at_path, is_valid, schema_at, validate_data, validate_union,
};
pub use value::{Kind, Value};
pub use walk::{
    delete, delete_parsed, for_each, for_each_parsed, get, get_as, get_parsed, set, set_parsed,
    set_with_schema,
};

/// Result type used throughout the dynpath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dynpath library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structured errors from the value module
    #[error(transparent)]
    Value(value::ValueError),

    /// Structured parse errors from the path module
    #[error(transparent)]
    Path(path::PathError),

    /// Structured traversal errors from the walk module
    #[error(transparent)]
    Walk(walk::WalkError),

    /// Structured conversion, validation and lookup errors from the schema module
    #[error(transparent)]
    Schema(schema::SchemaError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Value(_) => "value",
            Error::Path(_) => "path",
            Error::Walk(_) => "walk",
            Error::Schema(_) => "schema",
        }
    }

    /// Check if this error indicates nothing exists at a location.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Walk(walk_err) => walk_err.is_value_invalid(),
            Error::Schema(schema_err) => schema_err.is_schema_path_error(),
            _ => false,
        }
    }

    /// Check if this error is a malformed or inapplicable path segment.
    pub fn is_invalid_segment(&self) -> bool {
        match self {
            Error::Path(path_err) => path_err.is_invalid_segment(),
            Error::Walk(walk_err) => walk_err.is_segment_invalid(),
            _ => false,
        }
    }

    /// Check if this error is a conversion failure.
    pub fn is_conversion_error(&self) -> bool {
        match self {
            Error::Schema(schema_err) => schema_err.is_conversion_error(),
            _ => false,
        }
    }

    /// Check if this error is a validation failure.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Schema(schema_err) => schema_err.is_validation_error(),
            _ => false,
        }
    }

    /// Check if this error came from decoding text.
    pub fn is_deserialization_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_decode_error(),
            Error::Schema(schema_err) => schema_err.is_deserialization_error(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Value(value_err) => value_err.is_type_error(),
            _ => false,
        }
    }

    /// Get the operation that raised this error, if it came from an operation on a value.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::Path(_) => Some("parse"),
            Error::Walk(walk_err) => Some(walk_err.operation()),
            Error::Schema(schema_err) => Some(schema_err.operation()),
            _ => None,
        }
    }

    /// Get the path at which the failure happened, if known.
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::Path(path_err) => Some(path_err.path()),
            Error::Walk(walk_err) => Some(walk_err.path()),
            Error::Schema(schema_err) => Some(schema_err.path()),
            _ => None,
        }
    }
}
