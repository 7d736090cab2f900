//! ForEach: visit every location a path selects.

use tracing::debug;

use super::read::Reader;
use crate::Result;
use crate::path::{JsonPath, parse};
use crate::value::Value;

/// Calls `visit` with the resolved path and value of every match, in traversal order.
///
/// Lists are visited in index order and records in field declaration order. The order of map
/// entries is not part of the contract. Returning `true` from `visit` stops the whole traversal.
/// Matching nothing is not an error.
///
/// ```
/// # use dynpath::value::Value;
/// let root = Value::from_json_str("[10, 20, 30, 40]")?;
/// let mut seen = Vec::new();
/// dynpath::for_each(&root, "$[::2]", |path, value| {
///     seen.push(format!("{path}={value}"));
///     false
/// })?;
/// assert_eq!(seen, vec!["$[0]=10", "$[2]=30"]);
/// # Ok::<(), dynpath::Error>(())
/// ```
pub fn for_each<F>(root: &Value, path: &str, visit: F) -> Result<()>
where
    F: FnMut(&JsonPath, &Value) -> bool,
{
    for_each_parsed(root, &parse(path)?, visit)
}

/// [`for_each`] over an already parsed path
pub fn for_each_parsed<F>(root: &Value, path: &JsonPath, visit: F) -> Result<()>
where
    F: FnMut(&JsonPath, &Value) -> bool,
{
    debug!(operation = "for_each", %path, "start");
    Reader::new("for_each", path, visit).run(root)?;
    Ok(())
}
