pub mod adjustment;
pub mod chart;
pub mod comparison;
pub mod config;
pub mod error;
pub mod estimator;
pub mod fips;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod projection;
pub mod providers;
pub mod scoring;
pub mod server;
pub mod signals;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `default_level`. Output goes to stderr so
/// CLI results on stdout stay clean.
///
/// Note: This function can only be called once.
pub fn init_tracing(default_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
