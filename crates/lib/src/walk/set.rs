//! Set: assign a value at every location a path selects.

use tracing::debug;

use super::WalkError;
use super::select::Step;
use super::write::{WriteAction, WriteContext, Writer};
use crate::Result;
use crate::path::{JsonPath, parse};
use crate::schema::Schema;
use crate::value::Value;

/// Assigns `value` at `path`, creating missing structure on the way.
///
/// Absent values (null or nil references) along the path are replaced by a fresh map, or by a
/// growable list when the next segment is index-shaped. Growable lists are padded with nulls up to
/// the written index. Returns the number of assignments made.
///
/// Writes are applied in place and are not rolled back: if a later target of a multi-valued
/// selector fails, earlier targets stay written.
///
/// ```
/// # use dynpath::value::Value;
/// let mut root = Value::Null;
/// assert_eq!(dynpath::set(&mut root, "$.user.tags[1]", "b".into())?, 1);
/// assert_eq!(root.to_json_string(), r#"{"user":{"tags":[null,"b"]}}"#);
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<u64> {
    set_parsed(root, &parse(path)?, value, None)
}

/// Like [`set`], but consults `schema` to decide the exact shape of created structure.
///
/// Created records, fixed-length lists and maps take the zero value of the schema node at their
/// location, and growable lists are padded with the element schema's zero value. Locations the
/// schema does not describe fall back to the generic shapes [`set`] uses.
pub fn set_with_schema(root: &mut Value, path: &str, value: Value, schema: &Schema) -> Result<u64> {
    set_parsed(root, &parse(path)?, value, Some(schema))
}

/// [`set`] over an already parsed path, with an optional schema
pub fn set_parsed(
    root: &mut Value,
    path: &JsonPath,
    value: Value,
    schema: Option<&Schema>,
) -> Result<u64> {
    debug!(operation = "set", %path, with_schema = schema.is_some(), "start");
    let count = Writer::new(path, schema, SetAction { value }).run(root)?;
    debug!(operation = "set", %path, count, "done");
    Ok(count)
}

struct SetAction {
    value: Value,
}

impl WriteAction for SetAction {
    fn operation(&self) -> &'static str {
        "set"
    }

    fn creates(&self) -> bool {
        true
    }

    fn apply_root(&mut self, root: &mut Value) -> u64 {
        assign(root, self.value.clone());
        1
    }

    fn apply(
        &mut self,
        ctx: &WriteContext<'_>,
        target: &mut Value,
        steps: &[Step],
        here: &JsonPath,
        strict: bool,
    ) -> std::result::Result<u64, WalkError> {
        let mut count = 0;
        for step in steps {
            match (step, &mut *target) {
                (Step::Key(key), Value::Map(map)) => {
                    match map.get_mut(key) {
                        Some(slot) => assign(slot, self.value.clone()),
                        None => {
                            map.insert(key.clone(), self.value.clone());
                        }
                    }
                    count += 1;
                }
                (Step::Key(name), Value::Record(record)) => {
                    let Some(field) = record.field_mut(name) else {
                        continue;
                    };
                    if !field.mutable {
                        if strict {
                            let snapshot = Value::Record(record.clone());
                            return Err(WalkError::value_invalid(
                                "set",
                                here,
                                &snapshot,
                                format!("field '{name}' is read-only"),
                            ));
                        }
                        continue;
                    }
                    assign(&mut field.value, self.value.clone());
                    count += 1;
                }
                (Step::Index(index), Value::List(list)) => {
                    if *index >= list.len() {
                        list.grow_to(index + 1, |i| ctx.zero_at(&here.clone().index(i)))
                            .map_err(|err| {
                                WalkError::value_invalid("set", here, &Value::Null, err.to_string())
                            })?;
                    }
                    if let Some(slot) = list.get_mut(*index) {
                        assign(slot, self.value.clone());
                        count += 1;
                    }
                }
                _ => {}
            }
        }
        Ok(count)
    }
}

/// Writes `value` into `slot`, through the slot's reference if it holds one.
fn assign(slot: &mut Value, value: Value) {
    if !matches!(slot, Value::Ref(_)) || matches!(value, Value::Ref(_)) {
        *slot = value;
        return;
    }
    let inner = slot.deref_value_mut();
    if matches!(inner, Value::Ref(_)) {
        inner.rebind(value);
    } else {
        *inner = value;
    }
}
