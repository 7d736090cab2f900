//! Conversion of loosely-typed values into the exact shape a schema describes.

use tracing::{debug, trace};

use super::{DynamicSchema, DynamicSchemaNode, Schema, SchemaError};
use crate::path::JsonPath;
use crate::value::{Field, Kind, List, Map, Record, Value};

/// Result of converting a value against a union: the alternative that accepted it, and the
/// converted value.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionMatch {
    /// Name of the alternative that accepted the value
    pub alternative: String,
    /// The converted value
    pub value: Value,
}

/// Converts `source` into the shape `schema` describes.
///
/// Coercion rules by destination kind:
///
/// - bool: from bools, from numbers (non-zero is `true`), and from strings holding a bool or a
///   number
/// - int: from ints, from floats by truncation, from bools, and from decimal strings
/// - float: from numbers, bools and decimal strings
/// - string: from strings, numbers and bools
/// - record: from records (matching exported fields by name) or maps (matching keys); only
///   declared fields are filled
/// - map: from maps or records; each entry follows the fixed child for its key, else the first
///   union alternative that accepts it, else the wildcard key/value schemas
/// - list/array: element-wise from lists; arrays are zero-padded to their length
/// - ref: converts into the pointee and wraps the result in a fresh reference
///
/// Records, maps and lists also accept a string holding JSON, which is decoded and converted.
/// Absent sources convert to the node's zero value. A custom converter on a node replaces all of
/// the above for that node.
///
/// A failing child aborts the whole conversion unless its parent node is nilable, in which case
/// the child is left out.
///
/// ```
/// # use dynpath::schema::{DynamicSchemaNode, Schema};
/// # use dynpath::value::Value;
/// let schema: Schema = DynamicSchemaNode::array(4, DynamicSchemaNode::int()).into();
/// let converted = dynpath::convert(&Value::from_json_str(r#"[1.9, "2", true]"#)?, &schema)?;
/// assert_eq!(converted.to_json_string(), "[1,2,1,0]");
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn convert(source: &Value, schema: &Schema) -> crate::Result<Value> {
    debug!(operation = "convert", schema = %schema, "start");
    Ok(convert_schema(source, schema, &JsonPath::root(), false)?)
}

/// Converts `source` against a union and reports which alternative accepted it.
///
/// The default alternative is tried first, then the others in order. A record or fixed-key map
/// alternative only accepts a source whose keys it all declares.
pub fn convert_union(source: &Value, union: &DynamicSchema) -> crate::Result<UnionMatch> {
    debug!(operation = "convert", union = union.name(), "start");
    Ok(convert_alternatives(source, union, &JsonPath::root())?)
}

fn convert_schema(
    source: &Value,
    schema: &Schema,
    here: &JsonPath,
    strict_keys: bool,
) -> Result<Value, SchemaError> {
    match schema {
        Schema::Node(node) => convert_node(source, node, here, strict_keys),
        Schema::Union(union) => convert_alternatives(source, union, here).map(|m| m.value),
    }
}

fn convert_alternatives(
    source: &Value,
    union: &DynamicSchema,
    here: &JsonPath,
) -> Result<UnionMatch, SchemaError> {
    for (name, node) in union.alternatives() {
        match convert_node(source, node, here, true) {
            Ok(value) => {
                debug!(union = union.name(), alternative = name, path = %here, "union alternative selected");
                return Ok(UnionMatch {
                    alternative: name.to_string(),
                    value,
                });
            }
            Err(err) => trace!(union = union.name(), alternative = name, error = %err, "alternative rejected"),
        }
    }
    Err(conversion_failed(
        here,
        &format!("union {}", union.name()),
        source,
        "no alternative accepts the value",
    ))
}

fn conversion_failed(here: &JsonPath, schema: &str, value: &Value, reason: &str) -> SchemaError {
    SchemaError::ConversionFailed {
        path: here.render(),
        schema: schema.to_string(),
        value: value.snapshot(),
        reason: reason.to_string(),
    }
}

/// Passes a child result through, or drops a failure if `parent` is nilable.
fn tolerate<T>(
    parent: &DynamicSchemaNode,
    result: Result<T, SchemaError>,
) -> Result<Option<T>, SchemaError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if parent.is_nilable() => {
            debug!(error = %err, "nilable node omits failed child");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn convert_node(
    source: &Value,
    node: &DynamicSchemaNode,
    here: &JsonPath,
    strict_keys: bool,
) -> Result<Value, SchemaError> {
    if let Some(converter) = node.converter() {
        return converter
            .convert(source, node)
            .map_err(|source| SchemaError::ConverterFailed {
                path: here.render(),
                schema: node.describe(),
                source,
            });
    }

    let source = source.deref_value();
    if source.is_absent() {
        return Ok(node.zero_value());
    }
    let fail = |reason: &str| conversion_failed(here, &node.describe(), source, reason);

    match node.kind() {
        Kind::Any => Ok(source.clone()),
        Kind::Null => Ok(Value::Null),
        Kind::Bool => to_bool(source)
            .map(Value::Bool)
            .ok_or_else(|| fail("not convertible to bool")),
        Kind::Int => to_int(source)
            .map(Value::Int)
            .ok_or_else(|| fail("not convertible to int")),
        Kind::Float => to_float(source)
            .map(Value::Float)
            .ok_or_else(|| fail("not convertible to float")),
        Kind::String => to_text(source)
            .map(Value::Text)
            .ok_or_else(|| fail("not convertible to string")),
        Kind::Record => convert_record(source, node, here, strict_keys),
        Kind::Map => convert_map(source, node, here, strict_keys),
        Kind::List | Kind::Array => convert_list(source, node, here),
        Kind::Ref => match node.pointee() {
            Some(pointee) => Ok(Value::reference(convert_schema(
                source,
                pointee,
                here,
                strict_keys,
            )?)),
            None => Ok(Value::reference(source.clone())),
        },
    }
}

fn to_bool(source: &Value) -> Option<bool> {
    match source {
        Value::Bool(b) => Some(*b),
        Value::Int(n) => Some(*n != 0),
        Value::Float(n) => Some(*n != 0.0),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<bool>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|n| n != 0.0))
        }
        _ => None,
    }
}

fn to_int(source: &Value) -> Option<i64> {
    let truncate = |n: f64| {
        let n = n.trunc();
        (n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64).then_some(n as i64)
    };
    match source {
        Value::Int(n) => Some(*n),
        Value::Float(n) => truncate(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn to_float(source: &Value) -> Option<f64> {
    match source {
        Value::Float(n) => Some(*n),
        Value::Int(n) => Some(*n as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn to_text(source: &Value) -> Option<String> {
    match source {
        Value::Text(s) => Some(s.clone()),
        Value::Int(n) => Some(n.to_string()),
        Value::Float(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decodes a JSON string source and converts the result.
fn convert_decoded(
    text: &str,
    source: &Value,
    node: &DynamicSchemaNode,
    here: &JsonPath,
    strict_keys: bool,
) -> Result<Value, SchemaError> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|err| SchemaError::DeserializationFailed {
            path: here.render(),
            value: source.snapshot(),
            source: err,
        })?;
    let decoded = Value::from_json(&json);
    if matches!(decoded, Value::Text(_)) {
        return Err(conversion_failed(
            here,
            &node.describe(),
            source,
            "string does not encode a container",
        ));
    }
    trace!(path = %here, "converting decoded string");
    convert_node(&decoded, node, here, strict_keys)
}

/// Named entries of a map or the exported fields of a record
fn entries_of(source: &Value) -> Option<Vec<(&str, &Value)>> {
    match source {
        Value::Map(map) => Some(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
        Value::Record(record) => Some(
            record
                .exported_fields()
                .map(|f| (f.name.as_str(), &f.value))
                .collect(),
        ),
        _ => None,
    }
}

fn convert_record(
    source: &Value,
    node: &DynamicSchemaNode,
    here: &JsonPath,
    strict_keys: bool,
) -> Result<Value, SchemaError> {
    let entries = match (source, entries_of(source)) {
        (_, Some(entries)) => entries,
        (Value::Text(text), None) => {
            return convert_decoded(text, source, node, here, strict_keys);
        }
        _ => {
            return Err(conversion_failed(
                here,
                &node.describe(),
                source,
                "expected a record, a map or a string",
            ));
        }
    };

    if strict_keys {
        if let Some((unknown, _)) = entries.iter().find(|(k, _)| node.child(k).is_none()) {
            return Err(conversion_failed(
                here,
                &node.describe(),
                source,
                &format!("unknown field '{unknown}'"),
            ));
        }
    }

    let mut record = match node.zero_value() {
        Value::Record(record) => record,
        other => {
            return Err(conversion_failed(
                here,
                &node.describe(),
                &other,
                "default value is not a record",
            ));
        }
    };

    for (name, child) in node.children() {
        let Some((_, value)) = entries.iter().find(|(k, _)| *k == name.as_str()) else {
            continue;
        };
        let child_path = here.clone().key(name.clone());
        let converted = convert_schema(value, child, &child_path, false);
        let Some(converted) = tolerate(node, converted)? else {
            continue;
        };
        if record.field_by_name(name).is_some() {
            record.set(name, converted);
        } else {
            record = record.with_field(Field::new(name.clone(), converted));
        }
    }
    Ok(Value::Record(record))
}

fn convert_map(
    source: &Value,
    node: &DynamicSchemaNode,
    here: &JsonPath,
    strict_keys: bool,
) -> Result<Value, SchemaError> {
    let entries = match (source, entries_of(source)) {
        (_, Some(entries)) => entries,
        (Value::Text(text), None) => {
            return convert_decoded(text, source, node, here, strict_keys);
        }
        _ => {
            return Err(conversion_failed(
                here,
                &node.describe(),
                source,
                "expected a map, a record or a string",
            ));
        }
    };

    let mut map = Map::new();
    for (key, value) in entries {
        let child_path = here.clone().key(key);
        let converted = convert_entry(key, value, node, &child_path, strict_keys);
        if let Some((key, value)) = tolerate(node, converted)? {
            map.insert(key, value);
        }
    }
    Ok(Value::Map(map))
}

/// Converts one map entry, returning the converted key and value
fn convert_entry(
    key: &str,
    value: &Value,
    node: &DynamicSchemaNode,
    here: &JsonPath,
    strict_keys: bool,
) -> Result<(String, Value), SchemaError> {
    if let Some(child) = node.child(key) {
        return Ok((key.to_string(), convert_schema(value, child, here, false)?));
    }
    match node.value_schema() {
        Some(Schema::Union(union)) => {
            let key = convert_key(key, node.key_schema(), here)?;
            for (name, alternative) in union.alternatives() {
                if let Ok(converted) = convert_node(value, alternative, here, true) {
                    debug!(union = union.name(), alternative = name, path = %here, "union alternative selected");
                    return Ok((key, converted));
                }
            }
            Err(conversion_failed(
                here,
                &format!("union {}", union.name()),
                value,
                "no alternative accepts the entry",
            ))
        }
        Some(schema) => Ok((
            convert_key(key, node.key_schema(), here)?,
            convert_schema(value, schema, here, false)?,
        )),
        None if strict_keys => Err(conversion_failed(
            here,
            &node.describe(),
            value,
            &format!("unknown key '{key}'"),
        )),
        None => Ok((convert_key(key, node.key_schema(), here)?, value.clone())),
    }
}

/// Converts a map key through the key schema and renders it back to a string
fn convert_key(key: &str, schema: Option<&Schema>, here: &JsonPath) -> Result<String, SchemaError> {
    let Some(schema) = schema else {
        return Ok(key.to_string());
    };
    match convert_schema(&Value::from(key), schema, here, false)? {
        Value::Text(text) => Ok(text),
        other => Ok(other.to_string()),
    }
}

fn convert_list(
    source: &Value,
    node: &DynamicSchemaNode,
    here: &JsonPath,
) -> Result<Value, SchemaError> {
    let items = match source {
        Value::List(list) => list.as_slice(),
        Value::Text(text) => return convert_decoded(text, source, node, here, false),
        _ => {
            return Err(conversion_failed(
                here,
                &node.describe(),
                source,
                "expected a list or a string",
            ));
        }
    };

    let fixed = node.kind() == Kind::Array;
    let length = node.length().unwrap_or(items.len());
    if fixed && items.len() > length {
        return Err(conversion_failed(
            here,
            &node.describe(),
            source,
            &format!("{} elements do not fit in length {length}", items.len()),
        ));
    }

    let element_zero = |index: usize| {
        node.element_at(index)
            .map(Schema::zero_value)
            .unwrap_or_default()
    };
    let mut converted = Vec::with_capacity(length);
    for (index, item) in items.iter().enumerate() {
        let child_path = here.clone().index(index);
        let result = match node.element_at(index) {
            Some(schema) => convert_schema(item, schema, &child_path, false),
            None => Ok(item.clone()),
        };
        match tolerate(node, result)? {
            Some(value) => converted.push(value),
            // Fixed lists keep their positions; growable lists drop the element
            None if fixed => converted.push(element_zero(index)),
            None => {}
        }
    }

    if fixed {
        for index in converted.len()..length {
            converted.push(element_zero(index));
        }
        return Ok(Value::List(List::fixed(converted)));
    }
    Ok(Value::List(List::growable(converted)))
}
