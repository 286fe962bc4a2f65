use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub mod formatter;

pub use formatter::LogFormatter;

use crate::configs::Config;

/// Build the filter directive from the `[logging]` table.
fn filter_directive(config: &Config) -> String {
    let log_level = config
        .logging
        .as_ref()
        .and_then(|l| l.level.as_deref())
        .unwrap_or("info");

    let filters = config
        .logging
        .as_ref()
        .and_then(|l| l.filters.as_deref())
        .unwrap_or("");

    if filters.is_empty() {
        log_level.to_string()
    } else {
        format!("{},{}", log_level, filters)
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the config.
///
/// Logs go to stderr so stdout stays free for tooling.
pub fn init(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let use_ansi = config
        .logging
        .as_ref()
        .and_then(|l| l.ansi)
        .unwrap_or(true);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .event_format(LogFormatter::new(use_ansi))
        .with_ansi(use_ansi);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
