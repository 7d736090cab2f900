//! Structural validation of values against schemas.

use tracing::{debug, trace};

use super::{DynamicSchema, DynamicSchemaNode, Schema, SchemaError};
use crate::path::JsonPath;
use crate::value::{Kind, Value};

/// Checks that `value` has exactly the shape `schema` describes.
///
/// Unlike [`convert`](super::convert) no coercion happens: kinds must match exactly (a
/// fixed-length list is an array, a growable one a list), records must carry the expected type
/// name and exactly the declared exported fields, arrays must have the declared length, and every
/// child is validated recursively. References are validated through their pointee; a nil
/// reference is always valid for a reference node. A nilable node accepts null and tolerates
/// failing children.
///
/// Unions accept a value if any alternative does, default first.
pub fn validate_data(value: &Value, schema: &Schema) -> crate::Result<()> {
    debug!(operation = "validate", schema = %schema, "start");
    Ok(validate_schema(value, schema, &JsonPath::root())?)
}

/// Returns true if [`validate_data`] succeeds
pub fn is_valid(value: &Value, schema: &Schema) -> bool {
    validate_schema(value, schema, &JsonPath::root()).is_ok()
}

/// Validates `value` against a union and returns the name of the first alternative it satisfies
///
/// ```
/// # use dynpath::schema::{DynamicSchema, DynamicSchemaNode, validate_union};
/// # use dynpath::value::Value;
/// let id = DynamicSchema::new("Id")
///     .with_alternative("Number", DynamicSchemaNode::int())
///     .with_alternative("Name", DynamicSchemaNode::string());
/// assert_eq!(validate_union(&Value::from("x7"), &id)?, "Name");
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn validate_union(value: &Value, union: &DynamicSchema) -> crate::Result<String> {
    debug!(operation = "validate", union = union.name(), "start");
    Ok(validate_alternatives(value, union, &JsonPath::root())?)
}

fn validate_schema(value: &Value, schema: &Schema, here: &JsonPath) -> Result<(), SchemaError> {
    match schema {
        Schema::Node(node) => validate_node(value, node, here),
        Schema::Union(union) => validate_alternatives(value, union, here).map(|_| ()),
    }
}

fn validate_alternatives(
    value: &Value,
    union: &DynamicSchema,
    here: &JsonPath,
) -> Result<String, SchemaError> {
    for (name, node) in union.alternatives() {
        match validate_node(value, node, here) {
            Ok(()) => {
                trace!(union = union.name(), alternative = name, path = %here, "union alternative valid");
                return Ok(name.to_string());
            }
            Err(err) => trace!(union = union.name(), alternative = name, error = %err, "alternative invalid"),
        }
    }
    Err(validation_failed(
        here,
        &format!("union {}", union.name()),
        value,
        "no alternative matches",
    ))
}

fn validation_failed(here: &JsonPath, schema: &str, value: &Value, reason: &str) -> SchemaError {
    SchemaError::ValidationFailed {
        path: here.render(),
        schema: schema.to_string(),
        value: value.snapshot(),
        reason: reason.to_string(),
    }
}

/// Validates a child, swallowing the failure if `parent` is nilable
fn validate_child(
    parent: &DynamicSchemaNode,
    value: &Value,
    schema: &Schema,
    here: &JsonPath,
) -> Result<(), SchemaError> {
    match validate_schema(value, schema, here) {
        Err(err) if parent.is_nilable() => {
            debug!(error = %err, "nilable node tolerates invalid child");
            Ok(())
        }
        other => other,
    }
}

fn validate_node(value: &Value, node: &DynamicSchemaNode, here: &JsonPath) -> Result<(), SchemaError> {
    if let Some(validator) = node.validator() {
        return validator
            .validate(value, node)
            .map_err(|source| SchemaError::ValidatorFailed {
                path: here.render(),
                schema: node.describe(),
                value: value.snapshot(),
                source,
            });
    }
    if node.kind() == Kind::Any || (node.is_nilable() && value.is_absent()) {
        return Ok(());
    }
    let fail = |reason: String| validation_failed(here, &node.describe(), value, &reason);
    if value.kind() != node.kind() {
        return Err(fail(format!("expected {}, found {}", node.kind(), value.kind())));
    }

    match value {
        Value::Record(record) => {
            if let Some(expected) = node.type_name() {
                if record.name() != expected {
                    return Err(fail(format!("expected record {expected}, found {}", record.name())));
                }
            }
            for field in record.exported_fields() {
                let Some(child) = node.child(&field.name) else {
                    return Err(fail(format!("undeclared field '{}'", field.name)));
                };
                validate_child(node, &field.value, child, &here.clone().key(field.name.clone()))?;
            }
            if let Some((missing, _)) = node.children().find(|(name, _)| record.get(name).is_none()) {
                return Err(fail(format!("missing field '{missing}'")));
            }
            Ok(())
        }
        Value::Map(map) => {
            for (key, entry) in map.iter() {
                let child_path = here.clone().key(key.clone());
                if let Some(child) = node.child(key) {
                    validate_child(node, entry, child, &child_path)?;
                    continue;
                }
                if let Some(key_schema) = node.key_schema() {
                    let key_value = parse_key(key, key_schema);
                    validate_child(node, &key_value, key_schema, &child_path)?;
                }
                match node.value_schema() {
                    Some(schema) => validate_child(node, entry, schema, &child_path)?,
                    None if node.children().next().is_some() => {
                        return Err(fail(format!("undeclared key '{key}'")));
                    }
                    None => {}
                }
            }
            Ok(())
        }
        Value::List(list) => {
            if let Some(length) = node.length() {
                if list.len() != length {
                    return Err(fail(format!("expected length {length}, found {}", list.len())));
                }
            }
            for (index, item) in list.iter().enumerate() {
                if let Some(schema) = node.element_at(index) {
                    validate_child(node, item, schema, &here.clone().index(index))?;
                }
            }
            Ok(())
        }
        Value::Ref(Some(target)) => match node.pointee() {
            Some(pointee) => validate_child(node, target, pointee, here),
            None => Ok(()),
        },
        // A nil reference is the zero value of a reference node
        _ => Ok(()),
    }
}

/// Map keys are strings; a non-string key schema sees the key parsed into its kind
fn parse_key(key: &str, schema: &Schema) -> Value {
    let kind = schema.primary_node().map(DynamicSchemaNode::kind);
    let parsed = match kind {
        Some(Kind::Int) => key.parse::<i64>().ok().map(Value::Int),
        Some(Kind::Float) => key.parse::<f64>().ok().map(Value::Float),
        Some(Kind::Bool) => key.parse::<bool>().ok().map(Value::Bool),
        _ => None,
    };
    parsed.unwrap_or_else(|| Value::from(key))
}
