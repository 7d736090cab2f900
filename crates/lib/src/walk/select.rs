//! Per-segment child selection.
//!
//! [`select`] resolves one [`PathSegment`] against one (already dereferenced) value and yields the
//! [`Step`]s leading to the selected children. All four traversal operations share it, so the
//! per-kind rules live in exactly one place.

use tracing::trace;

use super::{MAX_GROWN_LENGTH, WalkError};
use crate::path::{JsonPath, PathSegment, UnionEntry};
use crate::value::{List, Map, Record, Value};

/// A single move from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    /// Map entry or record field
    Key(String),
    /// List element
    Index(usize),
}

impl Step {
    /// Returns `here` extended by this step
    pub(crate) fn append_to(&self, here: &JsonPath) -> JsonPath {
        match self {
            Step::Key(key) => here.clone().key(key.clone()),
            Step::Index(index) => here.clone().index(*index),
        }
    }

    /// Borrows the child this step leads to
    pub(crate) fn child<'v>(&self, container: &'v Value) -> Option<&'v Value> {
        match (self, container) {
            (Step::Key(key), Value::Map(map)) => map.get(key),
            (Step::Key(key), Value::Record(record)) => record.get(key),
            (Step::Index(index), Value::List(list)) => list.get(*index),
            _ => None,
        }
    }

    /// Mutably borrows the child this step leads to
    pub(crate) fn child_mut<'v>(&self, container: &'v mut Value) -> Option<&'v mut Value> {
        match (self, container) {
            (Step::Key(key), Value::Map(map)) => map.get_mut(key),
            (Step::Key(key), Value::Record(record)) => record.get_mut(key),
            (Step::Index(index), Value::List(list)) => list.get_mut(*index),
            _ => None,
        }
    }

    /// Lists the steps to every child a recursive-descent search scans.
    ///
    /// Records only expose exported fields.
    pub(crate) fn children_of(container: &Value) -> Vec<Step> {
        match container {
            Value::Map(map) => map.keys().cloned().map(Step::Key).collect(),
            Value::List(list) => (0..list.len()).map(Step::Index).collect(),
            Value::Record(record) => record
                .exported_fields()
                .map(|f| Step::Key(f.name.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Per-call selection policy.
pub(crate) struct Selector<'a> {
    /// Operation name used in errors
    pub operation: &'static str,
    /// Resolved path of the value being selected from
    pub here: &'a JsonPath,
    /// Missing or inapplicable explicit selections are errors rather than skipped
    pub strict: bool,
    /// Missing map keys and list slots past the end of growable lists are selected too
    pub create: bool,
    /// The segment is being matched by a recursive-descent search
    pub searching: bool,
}

impl Selector<'_> {
    fn miss(
        &self,
        value: &Value,
        segment: &PathSegment,
        missing: bool,
        reason: String,
    ) -> Result<Vec<Step>, WalkError> {
        if !self.strict {
            trace!(path = %self.here, %segment, %reason, "skipping selection");
            return Ok(Vec::new());
        }
        if missing {
            Err(WalkError::value_invalid(self.operation, self.here, value, reason))
        } else {
            Err(WalkError::segment_invalid(
                self.operation,
                self.here,
                segment,
                value,
                reason,
            ))
        }
    }
}

/// Resolves `segment` against `value`.
///
/// `value` must already be dereferenced. The root marker selects nothing; walkers skip it before
/// calling this.
pub(crate) fn select(
    sel: &Selector<'_>,
    value: &Value,
    segment: &PathSegment,
) -> Result<Vec<Step>, WalkError> {
    match value {
        Value::Map(map) => select_in_map(sel, value, map, segment),
        Value::Record(record) => select_in_record(sel, value, record, segment),
        Value::List(list) => select_in_list(sel, value, list, segment),
        Value::Null | Value::Ref(None) => {
            sel.miss(value, segment, true, "no value to select from".to_string())
        }
        _ => sel.miss(
            value,
            segment,
            false,
            format!("{} values have no children", value.kind()),
        ),
    }
}

fn select_in_map(
    sel: &Selector<'_>,
    value: &Value,
    map: &Map,
    segment: &PathSegment,
) -> Result<Vec<Step>, WalkError> {
    let key = match segment {
        PathSegment::Key(key) => key.clone(),
        PathSegment::Index(index) => index.to_string(),
        PathSegment::Wildcard => return Ok(map.keys().cloned().map(Step::Key).collect()),
        PathSegment::Union(entries) => {
            return Ok(entries
                .iter()
                .map(UnionEntry::as_key)
                .filter(|k| sel.create || map.contains_key(k))
                .map(Step::Key)
                .collect());
        }
        PathSegment::Slice { .. } | PathSegment::Root => {
            return sel.miss(
                value,
                segment,
                false,
                "slices apply to lists only".to_string(),
            );
        }
    };
    if sel.create || map.contains_key(&key) {
        Ok(vec![Step::Key(key)])
    } else {
        sel.miss(value, segment, true, format!("key '{key}' not found"))
    }
}

fn select_in_record(
    sel: &Selector<'_>,
    value: &Value,
    record: &Record,
    segment: &PathSegment,
) -> Result<Vec<Step>, WalkError> {
    match segment {
        PathSegment::Key(name) => match record.field_by_name(name) {
            Some(field) if field.exported => Ok(vec![Step::Key(name.clone())]),
            Some(_) if sel.searching => Ok(Vec::new()),
            Some(_) => Err(WalkError::segment_invalid(
                sel.operation,
                sel.here,
                segment,
                value,
                format!("field '{name}' of {} is not exported", record.name()),
            )),
            None => sel.miss(
                value,
                segment,
                true,
                format!("{} has no field '{name}'", record.name()),
            ),
        },
        PathSegment::Wildcard => Ok(record
            .exported_fields()
            .map(|f| Step::Key(f.name.clone()))
            .collect()),
        PathSegment::Union(entries) => Ok(entries
            .iter()
            .filter_map(|entry| match entry {
                UnionEntry::Key(name) => record.get(name).map(|_| Step::Key(name.clone())),
                UnionEntry::Index(_) => None,
            })
            .collect()),
        PathSegment::Index(_) | PathSegment::Slice { .. } | PathSegment::Root => sel.miss(
            value,
            segment,
            false,
            format!("record {} cannot be indexed", record.name()),
        ),
    }
}

fn select_in_list(
    sel: &Selector<'_>,
    value: &Value,
    list: &List,
    segment: &PathSegment,
) -> Result<Vec<Step>, WalkError> {
    let growable = sel.create && list.can_grow();
    let reachable = |index: usize| index < list.len() || (growable && index < MAX_GROWN_LENGTH);
    match segment {
        PathSegment::Index(index) if reachable(*index) => Ok(vec![Step::Index(*index)]),
        PathSegment::Index(index) if growable => sel.miss(
            value,
            segment,
            true,
            format!("index {index} exceeds the maximum list length {MAX_GROWN_LENGTH}"),
        ),
        PathSegment::Index(index) => sel.miss(
            value,
            segment,
            true,
            format!("index {index} out of range for length {}", list.len()),
        ),
        PathSegment::Wildcard => Ok((0..list.len()).map(Step::Index).collect()),
        PathSegment::Union(entries) => Ok(entries
            .iter()
            .filter_map(|entry| match entry {
                UnionEntry::Index(index) if reachable(*index) => Some(Step::Index(*index)),
                _ => None,
            })
            .collect()),
        PathSegment::Slice { end, .. } => {
            // An explicit end past the current length extends growable lists on write
            let span = match end.and_then(|end| usize::try_from(end).ok()) {
                Some(end) if growable && end > list.len() => end.min(MAX_GROWN_LENGTH),
                _ => list.len(),
            };
            let indices = segment.slice_indices(span).unwrap_or_default();
            Ok(indices
                .into_iter()
                .filter(|i| reachable(*i))
                .map(Step::Index)
                .collect())
        }
        PathSegment::Key(key) => sel.miss(
            value,
            segment,
            false,
            format!("lists have no key '{key}'"),
        ),
        PathSegment::Root => Ok(Vec::new()),
    }
}
