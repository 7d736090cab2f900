//! Traversal integration tests
//!
//! Tests are organized by operation: Get, Set, Delete and ForEach.

mod delete_tests;
mod for_each_tests;
mod get_tests;
mod set_tests;
