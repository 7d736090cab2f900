//! Schema lookup by absolute path.

use tracing::trace;

use super::{DynamicSchemaNode, Schema, SchemaError};
use crate::path::{JsonPath, PathSegment, parse};
use crate::value::Kind;

/// Returns the schema node describing the location at `path`.
///
/// The path must be absolute: no recursive descent, and only keys and indices after the root.
/// The lookup mirrors value traversal: references continue into their pointee, maps use the fixed
/// child for a key or else their wildcard value schema, lists use the fixed per-index child or
/// else their element schema, and records require the named field to be declared. Below an `any`
/// node every location is `any`.
///
/// For a union, the default alternative is tried first, then the others in order; the first
/// successful lookup wins.
///
/// ```
/// # use dynpath::schema::{DynamicSchemaNode, Schema, get_schema_at_path};
/// # use dynpath::value::Kind;
/// let schema: Schema = DynamicSchemaNode::record("Order")
///     .with_field("Lines", DynamicSchemaNode::list(DynamicSchemaNode::map(
///         DynamicSchemaNode::string(),
///         DynamicSchemaNode::float(),
///     )))
///     .into();
/// let node = get_schema_at_path(&"$.Lines[3].price".parse()?, &schema)?;
/// assert_eq!(node.kind(), Kind::Float);
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn get_schema_at_path(path: &JsonPath, schema: &Schema) -> crate::Result<DynamicSchemaNode> {
    Ok(lookup_path(path, schema)?)
}

/// [`get_schema_at_path`] for a path string
pub fn schema_at(path: &str, schema: &Schema) -> crate::Result<DynamicSchemaNode> {
    get_schema_at_path(&parse(path)?, schema)
}

pub(crate) fn lookup_path(path: &JsonPath, schema: &Schema) -> Result<DynamicSchemaNode, SchemaError> {
    if path.has_recursive_descent() {
        return Err(SchemaError::SchemaPath {
            path: path.render(),
            schema: schema.describe(),
            reason: "recursive descent is not an absolute path".to_string(),
        });
    }
    let segments = path.groups().first().map(|g| g.segments()).unwrap_or_default();
    lookup(schema, segments, &JsonPath::root())
}

fn lookup(
    schema: &Schema,
    segments: &[PathSegment],
    here: &JsonPath,
) -> Result<DynamicSchemaNode, SchemaError> {
    match schema {
        Schema::Node(node) => lookup_node(node, segments, here),
        Schema::Union(union) => {
            let mut last_error = None;
            for (name, node) in union.alternatives() {
                match lookup_node(node, segments, here) {
                    Ok(found) => {
                        trace!(union = union.name(), alternative = name, path = %here, "schema lookup matched");
                        return Ok(found);
                    }
                    Err(err) => last_error = Some(err),
                }
            }
            Err(last_error.unwrap_or_else(|| SchemaError::SchemaPath {
                path: here.render(),
                schema: schema.describe(),
                reason: "union has no alternatives".to_string(),
            }))
        }
    }
}

fn lookup_node(
    node: &DynamicSchemaNode,
    segments: &[PathSegment],
    here: &JsonPath,
) -> Result<DynamicSchemaNode, SchemaError> {
    let Some((segment, rest)) = segments.split_first() else {
        return Ok(node.clone());
    };
    let fail = |reason: String| SchemaError::SchemaPath {
        path: here.render(),
        schema: node.describe(),
        reason,
    };

    match (node.kind(), segment) {
        (_, PathSegment::Root) => lookup_node(node, rest, here),
        (Kind::Any, _) => Ok(DynamicSchemaNode::any()),
        (Kind::Ref, _) => match node.pointee() {
            Some(pointee) => lookup(pointee, segments, here),
            None => Ok(DynamicSchemaNode::any()),
        },
        (_, segment) if segment.is_multi_valued() => Err(fail(format!(
            "'{segment}' selects several locations; an absolute path is required"
        ))),
        (Kind::Map, PathSegment::Key(_) | PathSegment::Index(_)) => {
            let key = match segment {
                PathSegment::Index(index) => index.to_string(),
                PathSegment::Key(key) => key.clone(),
                _ => String::new(),
            };
            let child_path = here.clone().key(key.clone());
            match node.child(&key).or(node.value_schema()) {
                Some(child) => lookup(child, rest, &child_path),
                None if node.value_schema().is_none() && node.children().next().is_none() => {
                    Ok(DynamicSchemaNode::any())
                }
                None => Err(fail(format!("no entry schema for key '{key}'"))),
            }
        }
        (Kind::Record, PathSegment::Key(name)) => match node.child(name) {
            Some(child) => lookup(child, rest, &here.clone().key(name.clone())),
            None => Err(fail(format!("no field '{name}'"))),
        },
        (Kind::List | Kind::Array, PathSegment::Index(index)) => {
            if let Some(length) = node.length().filter(|len| index >= len) {
                return Err(fail(format!("index {index} beyond array length {length}")));
            }
            let child_path = here.clone().index(*index);
            match node.element_at(*index) {
                Some(child) => lookup(child, rest, &child_path),
                None => Ok(DynamicSchemaNode::any()),
            }
        }
        (kind, segment) => Err(fail(format!("'{segment}' does not apply to {kind}"))),
    }
}
