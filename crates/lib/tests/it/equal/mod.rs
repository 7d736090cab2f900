//! Equality integration tests

mod equal_tests;
