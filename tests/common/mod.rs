//! Shared test support: mock service clients and PDF fixtures.

// Each test target compiles its own copy of this module and uses a
// different subset of it.
#[allow(dead_code)]
pub mod mocks;
pub mod pdf;

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
/// Subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
