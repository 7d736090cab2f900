//! Schema integration tests
//!
//! Schema lookup by path, conversion into schema-described shapes, and validation.

mod validate_tests;
