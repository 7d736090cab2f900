//! Path traversal: Get, Set, Delete and ForEach.
//!
//! All four operations walk a [`JsonPath`](crate::path::JsonPath) over a [`Value`](crate::value::Value)
//! with the same cursor: a recursive-descent group index plus a segment index within the group.
//! Within a group, segments are applied by ordinary descent. At the end of a group that is not the
//! last one, the walk switches to a recursive-descent search of the whole subtree for the next
//! group's first segment, and resumes ordinary descent from every match.
//!
//! # Strictness
//!
//! A key or index reached without any earlier wildcard, union, slice or search is strict: if it is
//! missing, or cannot apply to the value it reaches, the operation fails. Once a multi-valued
//! selector or a search is involved, such misses are skipped. Hidden record fields are an error
//! whenever they are named explicitly.
//!
//! # Ordering
//!
//! Matches are produced in traversal order. Lists are walked in index order and records in field
//! declaration order. The order of map entries must not be relied upon.

pub mod errors;

mod delete;
mod for_each;
mod get;
mod read;
mod select;
mod set;
mod write;

pub use delete::{delete, delete_parsed};
pub use errors::WalkError;
pub use for_each::{for_each, for_each_parsed};
pub use get::{get, get_as, get_parsed};
pub use set::{set, set_parsed, set_with_schema};

/// Largest length a Set may grow a list to.
///
/// Indices and slice ends at or past this limit are never created.
pub const MAX_GROWN_LENGTH: usize = 1 << 20;
