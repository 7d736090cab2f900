//! Get: read the value(s) a path selects.

use tracing::debug;

use super::WalkError;
use super::read::Reader;
use crate::Result;
use crate::path::{JsonPath, parse};
use crate::value::{List, Value};

/// Returns the value at `path`.
///
/// A path made only of single-valued segments returns the selected value itself. A path containing
/// a wildcard, union, slice or recursive descent returns a [`Value::List`] of every match in
/// traversal order. References along the way, including at the match, are followed.
///
/// # Errors
///
/// - path-segment-invalid when a segment cannot apply to the value it reaches
/// - value-at-path-invalid when a strict key or index is missing, or when nothing matches
///
/// ```
/// # use dynpath::value::Value;
/// let root = Value::from_json_str(r#"{"store": {"book": [{"title": "A"}, {"title": "B"}]}}"#)?;
///
/// assert_eq!(dynpath::get(&root, "$.store.book[1].title")?, "B");
///
/// let titles = dynpath::get(&root, "$..title")?;
/// assert_eq!(titles.to_json_string(), r#"["A","B"]"#);
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn get(root: &Value, path: &str) -> Result<Value> {
    get_parsed(root, &parse(path)?)
}

/// [`get`] over an already parsed path
pub fn get_parsed(root: &Value, path: &JsonPath) -> Result<Value> {
    debug!(operation = "get", %path, "start");
    let mut found = Vec::new();
    Reader::new("get", path, |_: &JsonPath, value: &Value| {
        found.push(value.clone());
        false
    })
    .run(root)?;

    if found.is_empty() {
        return Err(WalkError::value_invalid("get", path, root, "no value found").into());
    }
    if path.is_multi_valued() {
        return Ok(Value::List(List::growable(found)));
    }
    found
        .into_iter()
        .next()
        .ok_or_else(|| WalkError::value_invalid("get", path, root, "no value found").into())
}

/// Returns the value at `path` converted to `T`, or `None` if it is missing or of another kind.
///
/// ```
/// # use dynpath::value::Value;
/// let root = Value::from_json_str(r#"{"n": 3}"#)?;
/// assert_eq!(dynpath::get_as::<i64>(&root, "$.n"), Some(3));
/// assert_eq!(dynpath::get_as::<String>(&root, "$.n"), None);
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn get_as<T>(root: &Value, path: &str) -> Option<T>
where
    T: for<'a> TryFrom<&'a Value>,
{
    let value = get(root, path).ok()?;
    T::try_from(&value).ok()
}
