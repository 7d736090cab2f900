/*! Integration tests for dynpath.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - path: Tests for path parsing and canonical rendering
 * - value: Tests for the dynamic value model and its JSON interop
 * - walk: Tests for Get, Set, Delete and ForEach
 * - schema: Tests for schema lookup, conversion and validation
 * - equal: Tests for structural equality and its overrides
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("dynpath=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod equal;
mod helpers;
mod path;
mod schema;
mod value;
mod walk;
