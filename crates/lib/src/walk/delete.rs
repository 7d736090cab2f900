//! Delete: remove or zero every location a path selects.

use tracing::debug;

use super::WalkError;
use super::select::Step;
use super::write::{WriteAction, WriteContext, Writer};
use crate::Result;
use crate::path::{JsonPath, parse};
use crate::value::Value;

/// Deletes the values at `path`, returning the number of deletions.
///
/// - map entries are removed
/// - record fields are reset to their zero value (counted even if already zero)
/// - elements of growable lists are removed, preserving the order of the rest
/// - elements of fixed-length lists are zeroed in place, since the list cannot shrink
/// - deleting the root (`$`) replaces it with its zero value
///
/// Nothing is created on the way down.
///
/// ```
/// # use dynpath::value::Value;
/// let mut root = Value::from_json_str(r#"{"a": [1, 2, 3, 4], "b": true}"#)?;
/// assert_eq!(dynpath::delete(&mut root, "$.a[1,3]")?, 2);
/// assert_eq!(dynpath::delete(&mut root, "$.b")?, 1);
/// assert_eq!(root.to_json_string(), r#"{"a":[1,3]}"#);
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn delete(root: &mut Value, path: &str) -> Result<u64> {
    delete_parsed(root, &parse(path)?)
}

/// [`delete`] over an already parsed path
pub fn delete_parsed(root: &mut Value, path: &JsonPath) -> Result<u64> {
    debug!(operation = "delete", %path, "start");
    let count = Writer::new(path, None, DeleteAction).run(root)?;
    debug!(operation = "delete", %path, count, "done");
    Ok(count)
}

struct DeleteAction;

impl WriteAction for DeleteAction {
    fn operation(&self) -> &'static str {
        "delete"
    }

    fn creates(&self) -> bool {
        false
    }

    fn apply_root(&mut self, root: &mut Value) -> u64 {
        *root = root.zeroed();
        1
    }

    fn apply(
        &mut self,
        _ctx: &WriteContext<'_>,
        target: &mut Value,
        steps: &[Step],
        here: &JsonPath,
        strict: bool,
    ) -> std::result::Result<u64, WalkError> {
        match target {
            Value::Map(map) => Ok(steps
                .iter()
                .filter_map(|step| match step {
                    Step::Key(key) => map.remove(key),
                    Step::Index(_) => None,
                })
                .count() as u64),
            Value::Record(record) => {
                let mut count = 0;
                for step in steps {
                    let Step::Key(name) = step else {
                        continue;
                    };
                    let read_only = record.field_by_name(name).is_some_and(|f| !f.mutable);
                    if read_only {
                        if strict {
                            let snapshot = Value::Record(record.clone());
                            return Err(WalkError::value_invalid(
                                "delete",
                                here,
                                &snapshot,
                                format!("field '{name}' is read-only"),
                            ));
                        }
                        continue;
                    }
                    if let Some(field) = record.field_mut(name) {
                        field.value = field.value.zeroed();
                        count += 1;
                    }
                }
                Ok(count)
            }
            Value::List(list) => {
                let indices: Vec<usize> = steps
                    .iter()
                    .filter_map(|step| match step {
                        Step::Index(index) => Some(*index),
                        Step::Key(_) => None,
                    })
                    .collect();
                if list.can_grow() {
                    return list
                        .remove_indices(&indices)
                        .map(|n| n as u64)
                        .map_err(|err| {
                            WalkError::value_invalid("delete", here, &Value::Null, err.to_string())
                        });
                }
                let mut count = 0;
                for index in indices {
                    if let Some(slot) = list.get_mut(index) {
                        *slot = slot.zeroed();
                        count += 1;
                    }
                }
                Ok(count)
            }
            _ => Ok(0),
        }
    }
}
