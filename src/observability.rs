//! Tracing setup
//!
//! Logs go to stderr so stdout carries only progress lines. At the default
//! level only warnings the user is not already told about get through.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count, used when `RUST_LOG` is unset
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "solrload=warn",
        1 => "solrload=info",
        2 => "solrload=debug",
        _ => "solrload=trace,reqwest=debug",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .try_init();
}
