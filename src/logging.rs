// src/logging.rs
// =============================================================================
// Diagnostic logging with `tracing`.
//
// User-facing progress ("Downloaded X") is printed with println! from main.rs
// and fetch/. This module only sets up the developer diagnostics, which go to
// stderr and are controlled by RUST_LOG:
//
//   RUST_LOG=repo_grab=debug repo-grab --owner rust-lang --repo log
// =============================================================================

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Our own warnings only (e.g. a truncated tree listing); reqwest and hyper stay quiet
const DEFAULT_DIRECTIVE: &str = concat!(env!("CARGO_CRATE_NAME"), "=warn");

/// Installs the global subscriber. Falls back to `repo_grab=warn` when RUST_LOG is unset.
pub fn init() {
    tracing_subscriber::registry()
        .with(filter_from(std::env::var("RUST_LOG").ok().as_deref()))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn filter_from(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
