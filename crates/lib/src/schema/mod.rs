//! Runtime schema model.
//!
//! A [`DynamicSchemaNode`] describes the expected shape at one location: its [`Kind`], and
//! depending on the kind, fixed child schemas per key or index, a wildcard key/value schema pair
//! for maps, an element schema for lists, or a pointee schema for references. Nodes also carry
//! per-node configuration: a nilable flag, a default-value factory, and optional custom
//! [`Converter`] and [`Validator`] overrides.
//!
//! A [`DynamicSchema`] is a named union of alternative nodes for locations whose destination
//! shape is polymorphic. Every child slot holds a [`Schema`], so unions can appear at any depth.
//!
//! Schemas are immutable once built: conversion and validation report which union alternative
//! matched as a return value ([`UnionMatch`], [`validate_union`]) and never record it on the
//! schema, so one schema can be shared freely.
//!
//! ```
//! use dynpath::schema::{DynamicSchemaNode, Schema};
//! use dynpath::value::Value;
//!
//! let person: Schema = DynamicSchemaNode::record("Person")
//!     .with_field("Name", DynamicSchemaNode::string())
//!     .with_field("Age", DynamicSchemaNode::int())
//!     .into();
//!
//! let source = Value::from_json_str(r#"{"Name": "Ada", "Age": "36"}"#)?;
//! let converted = dynpath::convert(&source, &person)?;
//! assert_eq!(dynpath::get(&converted, "$.Age")?, 36);
//! assert!(dynpath::is_valid(&converted, &person));
//! # Ok::<(), dynpath::Error>(())
//! ```

use std::{fmt, sync::Arc};

use indexmap::IndexMap;

pub mod errors;

mod convert;
mod lookup;
mod validate;

pub use convert::{UnionMatch, convert, convert_union};
pub use errors::{BoxError, SchemaError};
pub use lookup::{get_schema_at_path, schema_at};
pub use validate::{is_valid, validate_data, validate_union};

pub(crate) use lookup::lookup_path;

use crate::value::{Field, Kind, List, Map, Record, Value};

/// Factory producing the default value of a node
pub type DefaultFactory = Arc<dyn Fn() -> Value + Send + Sync>;

/// Custom conversion attached to a schema node.
///
/// When present it replaces every built-in coercion for that node.
pub trait Converter: Send + Sync {
    /// Converts `source` into the shape `node` describes
    fn convert(&self, source: &Value, node: &DynamicSchemaNode) -> Result<Value, BoxError>;
}

impl<F> Converter for F
where
    F: Fn(&Value, &DynamicSchemaNode) -> Result<Value, BoxError> + Send + Sync,
{
    fn convert(&self, source: &Value, node: &DynamicSchemaNode) -> Result<Value, BoxError> {
        self(source, node)
    }
}

/// Custom validation attached to a schema node.
///
/// When present it replaces the built-in kind check and child walk for that node.
pub trait Validator: Send + Sync {
    /// Checks that `value` satisfies `node`
    fn validate(&self, value: &Value, node: &DynamicSchemaNode) -> Result<(), BoxError>;
}

impl<F> Validator for F
where
    F: Fn(&Value, &DynamicSchemaNode) -> Result<(), BoxError> + Send + Sync,
{
    fn validate(&self, value: &Value, node: &DynamicSchemaNode) -> Result<(), BoxError> {
        self(value, node)
    }
}

/// One node of a runtime type descriptor tree.
#[derive(Clone)]
pub struct DynamicSchemaNode {
    kind: Kind,
    type_name: Option<String>,
    nilable: bool,
    length: Option<usize>,
    children: IndexMap<String, Schema>,
    key_schema: Option<Box<Schema>>,
    value_schema: Option<Box<Schema>>,
    element_schema: Option<Box<Schema>>,
    pointee: Option<Box<Schema>>,
    default_value: Option<DefaultFactory>,
    converter: Option<Arc<dyn Converter>>,
    validator: Option<Arc<dyn Validator>>,
}

impl DynamicSchemaNode {
    fn of_kind(kind: Kind) -> Self {
        Self {
            kind,
            type_name: None,
            nilable: false,
            length: None,
            children: IndexMap::new(),
            key_schema: None,
            value_schema: None,
            element_schema: None,
            pointee: None,
            default_value: None,
            converter: None,
            validator: None,
        }
    }

    /// A node accepting any value unchanged
    pub fn any() -> Self {
        Self::of_kind(Kind::Any)
    }

    /// A scalar node of the given kind (also usable for [`Kind::Null`])
    pub fn scalar(kind: Kind) -> Self {
        Self::of_kind(kind)
    }

    /// Shorthand for `scalar(Kind::Bool)`
    pub fn boolean() -> Self {
        Self::of_kind(Kind::Bool)
    }

    /// Shorthand for `scalar(Kind::Int)`
    pub fn int() -> Self {
        Self::of_kind(Kind::Int)
    }

    /// Shorthand for `scalar(Kind::Float)`
    pub fn float() -> Self {
        Self::of_kind(Kind::Float)
    }

    /// Shorthand for `scalar(Kind::String)`
    pub fn string() -> Self {
        Self::of_kind(Kind::String)
    }

    /// A record node. Add fields with [`DynamicSchemaNode::with_field`].
    pub fn record(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::of_kind(Kind::Record)
        }
    }

    /// A map node whose entries all follow the given key and value schemas
    pub fn map(key: impl Into<Schema>, value: impl Into<Schema>) -> Self {
        Self {
            key_schema: Some(Box::new(key.into())),
            value_schema: Some(Box::new(value.into())),
            ..Self::of_kind(Kind::Map)
        }
    }

    /// A map node with no wildcard entry schema, described by fixed keys only.
    ///
    /// Add keys with [`DynamicSchemaNode::with_child`].
    pub fn object() -> Self {
        Self::of_kind(Kind::Map)
    }

    /// A growable list node
    pub fn list(element: impl Into<Schema>) -> Self {
        Self {
            element_schema: Some(Box::new(element.into())),
            ..Self::of_kind(Kind::List)
        }
    }

    /// A fixed-length list node
    pub fn array(length: usize, element: impl Into<Schema>) -> Self {
        Self {
            length: Some(length),
            element_schema: Some(Box::new(element.into())),
            ..Self::of_kind(Kind::Array)
        }
    }

    /// A reference node pointing at `pointee`
    pub fn reference(pointee: impl Into<Schema>) -> Self {
        Self {
            pointee: Some(Box::new(pointee.into())),
            ..Self::of_kind(Kind::Ref)
        }
    }

    /// Marks the node nilable: the value may be absent, and failures of its children are
    /// tolerated by omitting the child
    pub fn nilable(mut self) -> Self {
        self.nilable = true;
        self
    }

    /// Sets the expected record type name
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Adds a fixed child: a map key, or a list index written in decimal
    pub fn with_child(mut self, key: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.children.insert(key.into(), schema.into());
        self
    }

    /// Adds a record field
    pub fn with_field(self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.with_child(name, schema)
    }

    /// Sets the factory producing this node's zero value
    pub fn with_default<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default_value = Some(Arc::new(factory));
        self
    }

    /// Attaches a custom converter
    ///
    /// ```
    /// # use dynpath::schema::{DynamicSchemaNode, Schema};
    /// # use dynpath::value::Value;
    /// let upper: Schema = DynamicSchemaNode::string()
    ///     .with_converter(|source: &Value, _: &DynamicSchemaNode| {
    ///         Ok(Value::from(source.as_text().unwrap_or_default().to_uppercase()))
    ///     })
    ///     .into();
    /// assert_eq!(dynpath::convert(&Value::from("abc"), &upper)?, "ABC");
    /// # Ok::<(), dynpath::Error>(())
    /// ```
    pub fn with_converter<F>(mut self, converter: F) -> Self
    where
        F: Fn(&Value, &DynamicSchemaNode) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Attaches a shared custom converter
    pub fn with_converter_arc(mut self, converter: Arc<dyn Converter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Attaches a custom validator
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value, &DynamicSchemaNode) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Attaches a shared custom validator
    pub fn with_validator_arc(mut self, validator: Arc<dyn Validator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn is_nilable(&self) -> bool {
        self.nilable
    }

    /// Fixed length of an array node
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Fixed child schema for a key, field name or decimal index
    pub fn child(&self, key: &str) -> Option<&Schema> {
        self.children.get(key)
    }

    /// Fixed children in declaration order
    pub fn children(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.children.iter()
    }

    pub fn key_schema(&self) -> Option<&Schema> {
        self.key_schema.as_deref()
    }

    pub fn value_schema(&self) -> Option<&Schema> {
        self.value_schema.as_deref()
    }

    pub fn element_schema(&self) -> Option<&Schema> {
        self.element_schema.as_deref()
    }

    pub fn pointee(&self) -> Option<&Schema> {
        self.pointee.as_deref()
    }

    pub(crate) fn converter(&self) -> Option<&Arc<dyn Converter>> {
        self.converter.as_ref()
    }

    pub(crate) fn validator(&self) -> Option<&Arc<dyn Validator>> {
        self.validator.as_ref()
    }

    /// Schema for element `index` of a list node: the fixed per-index child, else the element
    /// schema
    pub fn element_at(&self, index: usize) -> Option<&Schema> {
        self.child(&index.to_string()).or(self.element_schema())
    }

    /// Returns the zero value this node describes.
    ///
    /// The default factory wins when present. Otherwise records get every declared field at its
    /// own zero value, arrays get `length` zero elements, growable lists and maps are empty and
    /// references are nil.
    pub fn zero_value(&self) -> Value {
        if let Some(factory) = &self.default_value {
            return factory();
        }
        match self.kind {
            Kind::Any | Kind::Null => Value::Null,
            Kind::Bool => Value::Bool(false),
            Kind::Int => Value::Int(0),
            Kind::Float => Value::Float(0.0),
            Kind::String => Value::Text(String::new()),
            Kind::List => Value::List(List::new()),
            Kind::Array => {
                let length = self.length.unwrap_or(0);
                let items = (0..length)
                    .map(|i| self.element_at(i).map(Schema::zero_value).unwrap_or_default())
                    .collect();
                Value::List(List::fixed(items))
            }
            Kind::Map => Value::Map(Map::new()),
            Kind::Record => {
                let record = self.children.iter().fold(
                    Record::new(self.type_name.clone().unwrap_or_default()),
                    |record, (name, schema)| {
                        record.with_field(Field::new(name.clone(), schema.zero_value()))
                    },
                );
                Value::Record(record)
            }
            Kind::Ref => Value::Ref(None),
        }
    }

    /// Short human-readable description, used in errors and logs
    pub fn describe(&self) -> String {
        let describe_opt = |schema: Option<&Schema>| {
            schema
                .map(Schema::describe)
                .unwrap_or_else(|| "any".to_string())
        };
        let mut text = match self.kind {
            Kind::Record => format!("record {}", self.type_name().unwrap_or("<anonymous>")),
            Kind::Map if self.value_schema.is_none() => "object".to_string(),
            Kind::Map => format!(
                "map<{}, {}>",
                describe_opt(self.key_schema()),
                describe_opt(self.value_schema())
            ),
            Kind::List => format!("list<{}>", describe_opt(self.element_schema())),
            Kind::Array => format!(
                "array[{}]<{}>",
                self.length.unwrap_or(0),
                describe_opt(self.element_schema())
            ),
            Kind::Ref => format!("ref<{}>", describe_opt(self.pointee())),
            other => other.to_string(),
        };
        if self.nilable {
            text.push('?');
        }
        text
    }
}

impl fmt::Debug for DynamicSchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicSchemaNode")
            .field("kind", &self.kind)
            .field("type_name", &self.type_name)
            .field("nilable", &self.nilable)
            .field("length", &self.length)
            .field("children", &self.children)
            .field("key_schema", &self.key_schema)
            .field("value_schema", &self.value_schema)
            .field("element_schema", &self.element_schema)
            .field("pointee", &self.pointee)
            .field("has_default", &self.default_value.is_some())
            .field("has_converter", &self.converter.is_some())
            .field("has_validator", &self.validator.is_some())
            .finish()
    }
}

/// A named union of alternative schema nodes.
///
/// One alternative may be designated the default; it is always tried first. The remaining
/// alternatives are tried in the order they were added.
///
/// ```
/// # use dynpath::schema::{DynamicSchema, DynamicSchemaNode};
/// let shape = DynamicSchema::new("Shape")
///     .with_alternative("Square", DynamicSchemaNode::record("Square"))
///     .with_default_alternative("Circle", DynamicSchemaNode::record("Circle"));
/// let order: Vec<&str> = shape.alternatives().into_iter().map(|(name, _)| name).collect();
/// assert_eq!(order, vec!["Circle", "Square"]);
/// ```
#[derive(Debug, Clone)]
pub struct DynamicSchema {
    name: String,
    default: Option<String>,
    alternatives: IndexMap<String, DynamicSchemaNode>,
}

impl DynamicSchema {
    /// Creates an empty union
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            alternatives: IndexMap::new(),
        }
    }

    /// Adds an alternative
    pub fn with_alternative(mut self, name: impl Into<String>, node: DynamicSchemaNode) -> Self {
        self.alternatives.insert(name.into(), node);
        self
    }

    /// Adds an alternative and makes it the default
    pub fn with_default_alternative(
        mut self,
        name: impl Into<String>,
        node: DynamicSchemaNode,
    ) -> Self {
        let name = name.into();
        self.default = Some(name.clone());
        self.alternatives.insert(name, node);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of alternatives
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// Returns true if the union has no alternatives
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Looks up an alternative by name
    pub fn alternative(&self, name: &str) -> Option<&DynamicSchemaNode> {
        self.alternatives.get(name)
    }

    /// Returns the default alternative, or the first one added if none was designated
    pub fn default_alternative(&self) -> Option<(&str, &DynamicSchemaNode)> {
        self.default
            .as_deref()
            .and_then(|name| self.alternatives.get_key_value(name))
            .or_else(|| self.alternatives.first())
            .map(|(name, node)| (name.as_str(), node))
    }

    /// Returns every alternative, default first
    pub fn alternatives(&self) -> Vec<(&str, &DynamicSchemaNode)> {
        let default = self.default_alternative().map(|(name, _)| name);
        default
            .and_then(|name| self.alternatives.get_key_value(name))
            .into_iter()
            .chain(
                self.alternatives
                    .iter()
                    .filter(|(name, _)| Some(name.as_str()) != default),
            )
            .map(|(name, node)| (name.as_str(), node))
            .collect()
    }
}

/// A schema slot: a single node or a union of alternatives.
#[derive(Debug, Clone)]
pub enum Schema {
    Node(DynamicSchemaNode),
    Union(DynamicSchema),
}

impl Schema {
    /// The node standing for this schema when a single shape is needed: the node itself, or the
    /// default alternative of a union
    pub fn primary_node(&self) -> Option<&DynamicSchemaNode> {
        match self {
            Schema::Node(node) => Some(node),
            Schema::Union(union) => union.default_alternative().map(|(_, node)| node),
        }
    }

    /// Zero value of the primary node, or null
    pub fn zero_value(&self) -> Value {
        self.primary_node()
            .map(DynamicSchemaNode::zero_value)
            .unwrap_or_default()
    }

    /// Short human-readable description
    pub fn describe(&self) -> String {
        match self {
            Schema::Node(node) => node.describe(),
            Schema::Union(union) => format!("union {}", union.name()),
        }
    }
}

impl From<DynamicSchemaNode> for Schema {
    fn from(node: DynamicSchemaNode) -> Self {
        Schema::Node(node)
    }
}

impl From<DynamicSchema> for Schema {
    fn from(union: DynamicSchema) -> Self {
        Schema::Union(union)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
