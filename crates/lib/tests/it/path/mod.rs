//! Path integration tests
//!
//! Parsing, canonical rendering and serde support for `JsonPath`.

mod parse_tests;
