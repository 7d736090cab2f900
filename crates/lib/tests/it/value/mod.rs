//! Value model integration tests
//!
//! Construction, JSON interop, conversions and the path convenience methods on `Value`.

mod value_tests;
