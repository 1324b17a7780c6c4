use tracing::level_filters::LevelFilter;
use tracing_log::LogTracer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Initialize tracing from the logging config. `level` sets the default
/// directive (overridable via `RUST_LOG`), `format` picks console or JSON
/// output. Panics on nonsense values, since there is no sane fallback for a
/// misconfigured console.
pub fn init_logging(logging_config: &LoggingConfig) {
    let level_filter = match logging_config.level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            panic!(
                "Invalid logging.level '{}'. Valid values: trace, debug, warn, info, error",
                logging_config.level
            );
        }
    };

    // Route `log`-based records from dependencies through tracing too.
    let _ = LogTracer::init();

    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    match logging_config.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().json())
                .init();
        }
        "console" => {
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
        other => {
            panic!("Invalid logging.format '{}'. Valid values: json, console", other);
        }
    }
}
