// src/log.rs
//
// Logging goes through `tracing`. The short macros below are what the rest of
// the crate calls; `init` wires a stderr subscriber once per process.

use std::sync::OnceLock;

use tracing_subscriber::{fmt::time::Uptime, EnvFilter};

static INIT: OnceLock<()> = OnceLock::new();

/// Map `-v` count to a default filter. `RUST_LOG` always wins.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "voice_scrape=info",
        1 => "voice_scrape=debug",
        _ => "voice_scrape=trace,reqwest=debug",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

        // A second global subscriber (tests, embedding) is not an error for us.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_timer(Uptime::default())
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_filter(0), "voice_scrape=info");
        assert_eq!(default_filter(1), "voice_scrape=debug");
        assert!(default_filter(5).starts_with("voice_scrape=trace"));
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0);
        init(2);
        logd!("still alive");
    }
}
