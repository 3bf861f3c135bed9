//! Tracing subscriber setup.
//!
//! `TINCTURE_LOG` takes per-target directives (`tincture=debug,warn`). When it
//! is unset or unparseable the level comes from the `-v` count. Logs go to
//! stderr so stdout stays clean for generated CSS.

use std::io::IsTerminal;

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "TINCTURE_LOG";

/// Maps a `-v` count to a default level.
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the global subscriber. Call once, before any work.
pub fn init(verbose: u8) {
    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), verbose);
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(verbose > 1)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

fn build_filter(directives: Option<&str>, verbose: u8) -> EnvFilter {
    if let Some(filter) = directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        return filter;
    }
    EnvFilter::new(level_for(verbose).as_str().to_ascii_lowercase())
}
