//! Kind discriminator shared by values and schema nodes.

use std::fmt;

/// The kind of a dynamic value, or the kind a schema node expects.
///
/// Linear collections come in two kinds: [`Kind::Array`] has a fixed length and can never grow
/// or shrink, [`Kind::List`] is growable. [`Kind::Any`] never describes a value; a schema node
/// of kind `Any` accepts every value unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Accepts anything (schema only)
    #[default]
    Any,
    /// Null / absent value
    Null,
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// UTF-8 string
    String,
    /// Fixed-length linear collection
    Array,
    /// Growable linear collection
    List,
    /// Associative collection
    Map,
    /// Named record with ordered fields
    Record,
    /// Reference (pointer/optional) to another value
    Ref,
}

impl Kind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::List => "list",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Ref => "ref",
        }
    }

    /// Returns true for scalar kinds (bool, int, float, string).
    pub fn is_scalar(&self) -> bool {
        matches!(self, Kind::Bool | Kind::Int | Kind::Float | Kind::String)
    }

    /// Returns true for linear collection kinds (array, list).
    pub fn is_linear(&self) -> bool {
        matches!(self, Kind::Array | Kind::List)
    }

    /// Returns true for associative kinds (map, record).
    pub fn is_associative(&self) -> bool {
        matches!(self, Kind::Map | Kind::Record)
    }

    /// Returns true for kinds that can hold children.
    pub fn is_container(&self) -> bool {
        self.is_linear() || self.is_associative()
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
