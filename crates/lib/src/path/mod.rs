//! JSONPath-like path language.
//!
//! A path string is parsed into a [`JsonPath`]: an ordered list of
//! [`RecursiveDescentSegment`]s. The first group applies directly to the value being walked; every
//! following group was introduced by `..` and is reached by searching the whole subtree.
//!
//! # Grammar
//!
//! | Syntax | Segment |
//! |---|---|
//! | `$` | [`PathSegment::Root`] |
//! | `.key`, `['key']`, `["key"]` | [`PathSegment::Key`] |
//! | `*`, `.*`, `[*]` | [`PathSegment::Wildcard`] |
//! | `[3]` | [`PathSegment::Index`] |
//! | `['a','b',3]` | [`PathSegment::Union`] |
//! | `[start:end:step]` | [`PathSegment::Slice`] (every part optional) |
//! | `..` | starts a new recursive-descent group |
//!
//! ```
//! use dynpath::path::{JsonPath, PathSegment};
//!
//! let path: JsonPath = "$..Three[::2]['TwentyFour','04']".parse()?;
//! assert_eq!(path.groups().len(), 2);
//! assert_eq!(path.to_string(), "$..Three[::2]['TwentyFour','04']");
//!
//! let built = JsonPath::root().key("store").index(0).key("title");
//! assert_eq!(built.to_string(), "$.store[0].title");
//! # Ok::<(), dynpath::Error>(())
//! ```

use std::{fmt, str::FromStr};

pub mod errors;
mod parser;

pub use errors::PathError;
pub use parser::parse;

/// One entry of a union selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnionEntry {
    /// A quoted key
    Key(String),
    /// A bare integer
    Index(usize),
}

impl UnionEntry {
    /// Returns the entry as an associative key; indices are rendered in decimal
    pub fn as_key(&self) -> String {
        match self {
            UnionEntry::Key(key) => key.clone(),
            UnionEntry::Index(index) => index.to_string(),
        }
    }
}

/// A single path selector.
///
/// The meaning of a segment is fixed at parse time; which value kinds it may be applied to is only
/// decided during traversal. [`PathSegment::applies_to_associative`] and
/// [`PathSegment::applies_to_linear`] report the kinds a segment can ever apply to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// The `$` root marker
    Root,
    /// A named key or record field
    Key(String),
    /// Every child
    Wildcard,
    /// A linear index, or a decimal key against an associative collection
    Index(usize),
    /// An explicit, ordered set of keys and indices
    Union(Vec<UnionEntry>),
    /// A `start:end:step` range over a linear collection.
    ///
    /// Negative bounds count from the end. Missing parts default to the whole collection with a
    /// step of 1; a non-positive step is treated as 1.
    Slice {
        start: Option<i64>,
        end: Option<i64>,
        step: Option<i64>,
    },
}

impl PathSegment {
    /// Returns true if the segment can select children of maps or records
    pub fn applies_to_associative(&self) -> bool {
        match self {
            PathSegment::Key(_) | PathSegment::Wildcard | PathSegment::Index(_) => true,
            PathSegment::Union(_) => true,
            PathSegment::Root | PathSegment::Slice { .. } => false,
        }
    }

    /// Returns true if the segment can select elements of lists
    pub fn applies_to_linear(&self) -> bool {
        match self {
            PathSegment::Wildcard | PathSegment::Index(_) | PathSegment::Slice { .. } => true,
            PathSegment::Union(entries) => {
                entries.iter().any(|e| matches!(e, UnionEntry::Index(_)))
            }
            PathSegment::Root | PathSegment::Key(_) => false,
        }
    }

    /// Returns true if the segment may select more than one child
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            PathSegment::Wildcard | PathSegment::Union(_) | PathSegment::Slice { .. }
        )
    }

    /// Returns true if the segment looks like a linear selector.
    ///
    /// Used to pick a linear container over an associative one when creating missing structure.
    pub fn is_index_shaped(&self) -> bool {
        match self {
            PathSegment::Index(_) | PathSegment::Slice { .. } => true,
            PathSegment::Union(entries) => {
                !entries.is_empty() && entries.iter().all(|e| matches!(e, UnionEntry::Index(_)))
            }
            _ => false,
        }
    }

    /// Resolves a slice against a collection length into concrete indices.
    ///
    /// Both bounds are clamped to `0..=len`.
    ///
    /// Returns `None` for non-slice segments.
    ///
    /// ```
    /// # use dynpath::path::PathSegment;
    /// let slice = PathSegment::Slice { start: Some(-3), end: None, step: Some(2) };
    /// assert_eq!(slice.slice_indices(5), Some(vec![2, 4]));
    ///
    /// let past_end = PathSegment::Slice { start: Some(1), end: Some(i64::MAX), step: None };
    /// assert_eq!(past_end.slice_indices(3), Some(vec![1, 2]));
    /// ```
    pub fn slice_indices(&self, len: usize) -> Option<Vec<usize>> {
        let PathSegment::Slice { start, end, step } = self else {
            return None;
        };
        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let resolve = |bound: i64| {
            if bound < 0 {
                len.saturating_add(bound).max(0)
            } else {
                bound.min(len)
            }
        };
        let start = start.map(resolve).unwrap_or(0);
        let end = end.map(resolve).unwrap_or(len);
        let step = step.filter(|s| *s > 0).unwrap_or(1);
        Some(
            (start..end)
                .step_by(step as usize)
                .map(|i| i as usize)
                .collect(),
        )
    }

    fn render_into(&self, out: &mut String, leading: bool) {
        match self {
            PathSegment::Root => out.push('$'),
            PathSegment::Key(key) if is_identifier(key) => {
                if !leading {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Key(key) => {
                out.push('[');
                push_quoted(out, key);
                out.push(']');
            }
            PathSegment::Wildcard => out.push_str("[*]"),
            PathSegment::Index(index) => {
                out.push('[');
                out.push_str(&index.to_string());
                out.push(']');
            }
            PathSegment::Union(entries) => {
                out.push('[');
                for (i, entry) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    match entry {
                        UnionEntry::Key(key) => push_quoted(out, key),
                        UnionEntry::Index(index) => out.push_str(&index.to_string()),
                    }
                }
                out.push(']');
            }
            PathSegment::Slice { start, end, step } => {
                let part = |p: &Option<i64>| p.map(|n| n.to_string()).unwrap_or_default();
                out.push('[');
                out.push_str(&part(start));
                out.push(':');
                out.push_str(&part(end));
                if step.is_some() {
                    out.push(':');
                    out.push_str(&part(step));
                }
                out.push(']');
            }
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_into(&mut out, true);
        f.write_str(&out)
    }
}

/// Returns true if `key` can be written bare: a leading letter followed by letters, digits or
/// underscores.
pub fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

fn push_quoted(out: &mut String, key: &str) {
    out.push('\'');
    for c in key.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
}

/// A run of segments applied without an intervening `..`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RecursiveDescentSegment {
    segments: Vec<PathSegment>,
}

impl RecursiveDescentSegment {
    /// Creates a group from its segments
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Returns the segments in order
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the group has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any segment may select more than one child
    pub fn is_multi_valued(&self) -> bool {
        self.segments.iter().any(PathSegment::is_multi_valued)
    }
}

/// A parsed path.
///
/// Group 0 applies directly to the source value; every later group is a recursive-descent search
/// target. Equal paths render identically, and [`parse`] followed by [`fmt::Display`] reproduces
/// canonical input exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonPath {
    groups: Vec<RecursiveDescentSegment>,
}

impl Default for JsonPath {
    fn default() -> Self {
        Self::root()
    }
}

impl JsonPath {
    /// Creates the path `$`
    pub fn root() -> Self {
        Self {
            groups: vec![RecursiveDescentSegment::new(vec![PathSegment::Root])],
        }
    }

    /// Creates a path from its recursive-descent groups.
    ///
    /// An empty group list is normalised to a single empty group (the empty path).
    pub fn from_groups(groups: Vec<RecursiveDescentSegment>) -> Self {
        if groups.is_empty() {
            return Self {
                groups: vec![RecursiveDescentSegment::default()],
            };
        }
        Self { groups }
    }

    /// Returns the recursive-descent groups
    pub fn groups(&self) -> &[RecursiveDescentSegment] {
        &self.groups
    }

    /// Returns true if the path selects the root itself (`$` or the empty path)
    pub fn is_root(&self) -> bool {
        self.groups.len() == 1
            && self.groups[0]
                .segments()
                .iter()
                .all(|s| matches!(s, PathSegment::Root))
    }

    /// Returns true if the path contains a `..` search
    pub fn has_recursive_descent(&self) -> bool {
        self.groups.len() > 1
    }

    /// Returns true if the path can match more than one location
    pub fn is_multi_valued(&self) -> bool {
        self.has_recursive_descent() || self.groups.iter().any(|g| g.is_multi_valued())
    }

    /// Iterates over every segment of every group
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.groups.iter().flat_map(|g| g.segments().iter())
    }

    /// Builder: appends a segment to the last group
    pub fn push(mut self, segment: PathSegment) -> Self {
        self.push_segment(segment);
        self
    }

    /// Appends a segment to the last group in place
    pub fn push_segment(&mut self, segment: PathSegment) {
        match self.groups.last_mut() {
            Some(group) => group.segments.push(segment),
            None => self
                .groups
                .push(RecursiveDescentSegment::new(vec![segment])),
        }
    }

    /// Builder: appends a key segment
    pub fn key(self, key: impl Into<String>) -> Self {
        self.push(PathSegment::Key(key.into()))
    }

    /// Builder: appends an index segment
    pub fn index(self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Builder: appends a wildcard segment
    pub fn wildcard(self) -> Self {
        self.push(PathSegment::Wildcard)
    }

    /// Builder: starts a new recursive-descent group searching for `key`
    pub fn descend(mut self, key: impl Into<String>) -> Self {
        self.groups.push(RecursiveDescentSegment::new(vec![PathSegment::Key(
            key.into(),
        )]));
        self
    }

    /// Renders the path back to its string form
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (g, group) in self.groups.iter().enumerate() {
            if g > 0 {
                out.push_str("..");
            }
            for (i, segment) in group.segments().iter().enumerate() {
                // A bare key needs no dot at the very start or right after `..`
                segment.render_into(&mut out, i == 0);
            }
        }
        out
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for JsonPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl TryFrom<&str> for JsonPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse(s)
    }
}

impl serde::Serialize for JsonPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

impl<'de> serde::Deserialize<'de> for JsonPath {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(serde::de::Error::custom)
    }
}
