//! ndt command line.
//!
//! The binary is a thin dispatcher over [`commands`]; everything it prints
//! comes back from there as a `String` so the commands can be tested without
//! spawning a process.

use std::sync::Once;

pub mod commands;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber, once, when `RUST_LOG` is set.
///
/// Logs go to stderr so stdout carries only command output and stays
/// pipeable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
