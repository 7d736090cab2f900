//! Dynamic value model.
//!
//! Every traversal, conversion and validation routine in this crate operates on [`Value`], a
//! closed tagged variant over the shapes nested runtime data can take:
//!
//! - scalars: [`Value::Null`], [`Value::Bool`], [`Value::Int`], [`Value::Float`], [`Value::Text`]
//! - linear collections: [`Value::List`], either growable or fixed-length (see [`List`])
//! - associative collections: [`Value::Map`] (see [`Map`])
//! - records: [`Value::Record`], named aggregates with per-field visibility (see [`Record`])
//! - references: [`Value::Ref`], an optional pointer to another value
//!
//! References are transparent to path traversal: walkers dereference them before looking at the
//! pointee and write through them afterwards. A nil reference behaves like [`Value::Null`].

use std::fmt;

pub mod errors;
pub mod kind;
pub mod list;
pub mod map;
pub mod record;

pub use errors::ValueError;
pub use kind::Kind;
pub use list::List;
pub use map::Map;
pub use record::{Field, Record};

use crate::path::JsonPath;

/// A dynamically typed value.
///
/// # Direct Comparisons
///
/// `Value` implements `PartialEq` with primitive types:
///
/// ```
/// # use dynpath::value::Value;
/// let text = Value::from("hello");
/// let number = Value::Int(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(42 == number);
/// assert!(!(number == "hello"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Null / absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text string value
    Text(String),
    /// Linear collection, growable or fixed-length
    List(List),
    /// Associative collection
    Map(Map),
    /// Named record
    Record(Record),
    /// Reference to another value; `None` is a nil reference
    Ref(Option<Box<Value>>),
}

impl Value {
    /// Returns the kind of this value.
    ///
    /// Fixed-length lists report [`Kind::Array`], growable lists [`Kind::List`].
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Text(_) => Kind::String,
            Value::List(list) if list.can_grow() => Kind::List,
            Value::List(_) => Kind::Array,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Ref(_) => Kind::Ref,
        }
    }

    /// Returns the record type name for records, the kind name otherwise
    pub fn type_name(&self) -> &str {
        match self {
            Value::Record(record) => record.name(),
            other => other.kind().as_str(),
        }
    }

    /// Returns true if this is null or a nil reference
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Ref(None))
    }

    /// Returns true if this is exactly [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for bool, int, float and text values
    pub fn is_scalar(&self) -> bool {
        self.kind().is_scalar()
    }

    /// Returns true for lists, maps and records
    pub fn is_container(&self) -> bool {
        self.kind().is_container()
    }

    /// Follows references until reaching a non-reference or a nil reference.
    pub fn deref_value(&self) -> &Value {
        match self {
            Value::Ref(Some(inner)) => inner.deref_value(),
            other => other,
        }
    }

    /// Mutable counterpart of [`Value::deref_value`]
    pub fn deref_value_mut(&mut self) -> &mut Value {
        match self {
            Value::Ref(Some(inner)) => inner.deref_value_mut(),
            other => other,
        }
    }

    /// Points a reference at a new value.
    ///
    /// On a reference (nil or not) the reference is rebound to `target`. Any other value is
    /// replaced by `target` outright.
    pub fn rebind(&mut self, target: Value) {
        match self {
            Value::Ref(slot) => *slot = Some(Box::new(target)),
            other => *other = target,
        }
    }

    /// Returns the zero value of this value's type.
    ///
    /// Scalars zero to `false`, `0`, `0.0` or `""`. Growable lists and maps become empty.
    /// Fixed-length lists keep their length with every element zeroed. Records keep their name
    /// and fields with every field zeroed. References become nil.
    pub fn zeroed(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(_) => Value::Bool(false),
            Value::Int(_) => Value::Int(0),
            Value::Float(_) => Value::Float(0.0),
            Value::Text(_) => Value::Text(String::new()),
            Value::List(list) if list.can_grow() => Value::List(List::new()),
            Value::List(list) => {
                let mut zero = list.clone();
                zero.zero_all();
                Value::List(zero)
            }
            Value::Map(_) => Value::Map(Map::new()),
            Value::Record(record) => Value::Record(record.zeroed()),
            Value::Ref(_) => Value::Ref(None),
        }
    }

    /// Returns true if this value equals its own zero value
    pub fn is_zero(&self) -> bool {
        *self == self.zeroed()
    }

    /// Creates a reference to `value`
    pub fn reference(value: impl Into<Value>) -> Value {
        Value::Ref(Some(Box::new(value.into())))
    }

    /// Returns the boolean if this is a bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the text or an empty string
    pub fn as_text_or_empty(&self) -> &str {
        self.as_text().unwrap_or_default()
    }

    /// Returns the list if this is a list value
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns a mutable reference to the list if this is a list value
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the map if this is a map value
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns a mutable reference to the map if this is a map value
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the record if this is a record value
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns a mutable reference to the record if this is a record value
    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Converts this value into a `serde_json::Value`.
    ///
    /// Records become objects of their exported fields, nil references and non-finite floats
    /// become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null | Value::Ref(None) => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::Text(s) => Json::String(s.clone()),
            Value::List(list) => Json::Array(list.iter().map(Value::to_json).collect()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Record(record) => Json::Object(
                record
                    .exported_fields()
                    .map(|f| (f.name.clone(), f.value.to_json()))
                    .collect(),
            ),
            Value::Ref(Some(inner)) => inner.to_json(),
        }
    }

    /// Builds a value from a `serde_json::Value`.
    ///
    /// Arrays become growable lists and objects become maps. Integral numbers that fit in `i64`
    /// become ints, every other number becomes a float.
    pub fn from_json(json: &serde_json::Value) -> Value {
        use serde_json::Value as Json;
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            Json::String(s) => Value::Text(s.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            Json::Object(entries) => Value::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Decodes a value from JSON text
    ///
    /// ```
    /// # use dynpath::value::Value;
    /// let value = Value::from_json_str(r#"{"a": [1, 2.5, "x"]}"#).unwrap();
    /// assert_eq!(value.to_json_string(), r#"{"a":[1,2.5,"x"]}"#);
    /// ```
    pub fn from_json_str(text: &str) -> Result<Value, ValueError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|source| ValueError::Decode { source })?;
        Ok(Value::from_json(&json))
    }

    /// Encodes this value as compact JSON text
    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Short textual rendering used in error messages
    pub(crate) fn snapshot(&self) -> String {
        const LIMIT: usize = 64;
        let full = format!("{}({self})", self.type_name());
        match full.char_indices().nth(LIMIT) {
            Some((cut, _)) => format!("{}...", &full[..cut]),
            None => full,
        }
    }

    /// Reads the value at `path`. See [`crate::walk::get`].
    pub fn get_path(&self, path: &str) -> crate::Result<Value> {
        crate::walk::get(self, path)
    }

    /// Writes `value` at `path`. See [`crate::walk::set`].
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> crate::Result<u64> {
        crate::walk::set(self, path, value.into())
    }

    /// Deletes the value at `path`. See [`crate::walk::delete`].
    pub fn delete_path(&mut self, path: &str) -> crate::Result<u64> {
        crate::walk::delete(self, path)
    }

    /// Visits every value matched by `path`. See [`crate::walk::for_each`].
    pub fn for_each_path<F>(&self, path: &str, visit: F) -> crate::Result<()>
    where
        F: FnMut(&JsonPath, &Value) -> bool,
    {
        crate::walk::for_each(self, path, visit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null | Value::Ref(None) => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(list) => write!(f, "{list}"),
            Value::Map(map) => write!(f, "{map}"),
            Value::Record(record) => write!(f, "{record}"),
            Value::Ref(Some(inner)) => write!(f, "&{inner}"),
        }
    }
}

impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Ok(Value::from_json(&json))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<List> for Value {
    fn from(value: List) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Record(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from_json(&value)
    }
}

fn mismatch(expected: &str, value: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected: expected.to_string(),
        actual: value.type_name().to_string(),
    }
}

impl TryFrom<&Value> for bool {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_bool()
            .ok_or_else(|| mismatch("bool", value))
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_int()
            .ok_or_else(|| mismatch("int", value))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value.deref_value() {
            Value::Float(n) => Ok(*n),
            Value::Int(n) => Ok(*n as f64),
            _ => Err(mismatch("float", value)),
        }
    }
}

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", value))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = ValueError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_text()
            .ok_or_else(|| mismatch("string", value))
    }
}

impl TryFrom<&Value> for List {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_list()
            .cloned()
            .ok_or_else(|| mismatch("list", value))
    }
}

impl TryFrom<&Value> for Map {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_map()
            .cloned()
            .ok_or_else(|| mismatch("map", value))
    }
}

impl TryFrom<&Value> for Record {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .deref_value()
            .as_record()
            .cloned()
            .ok_or_else(|| mismatch("record", value))
    }
}

// PartialEq against primitives
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        matches!(self, Value::Text(s) if s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        matches!(self, Value::Int(n) if n == other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self == &(*other as i64)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(n) if n == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        matches!(self, Value::Bool(b) if b == other)
    }
}

impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
