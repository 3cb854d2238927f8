//! # EduPlatform Observability
//!
//! Installs the global `tracing` subscriber.
//!
//! - **Console**: compact, on stderr so it never interleaves with menu
//!   output on stdout. Filtered by `RUST_LOG`, else `LOG_LEVEL` (default
//!   `warn`).
//! - **File** (only when `LOG_DIR` is set): daily-rolling
//!   `eduplatform.log` at `info`, JSON lines when `LOG_JSON=true`.
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_config::LoggingConfig;
//!
//! let _guard = eduplatform_observability::init_logging(&LoggingConfig::from_env());
//! tracing::info!("ready");
//! ```

use eduplatform_config::LoggingConfig;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "eduplatform.log";

/// Console filter: `RUST_LOG` wins, then `level`, then `warn`.
pub fn console_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Installs console and optional file logging.
///
/// Keep the returned guard alive for the whole program; dropping it stops
/// the background file writer. `None` means no file layer is active.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_filter(console_filter(&config.level));

    let mut guard = None;
    let mut plain_layer = None;
    let mut json_layer = None;

    if let Some(dir) = &config.log_dir {
        match fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
                let (writer, worker_guard) = tracing_appender::non_blocking(appender);
                guard = Some(worker_guard);

                if config.json {
                    json_layer = Some(
                        fmt::layer()
                            .json()
                            .with_writer(writer)
                            .with_current_span(true)
                            .with_span_list(true)
                            .with_filter(EnvFilter::new("info")),
                    );
                } else {
                    plain_layer = Some(
                        fmt::layer()
                            .with_writer(writer)
                            .with_ansi(false)
                            .with_target(true)
                            .with_filter(EnvFilter::new("info")),
                    );
                }
            }
            Err(e) => {
                eprintln!("⚠️  Cannot create log directory {}: {}. File logging disabled.", dir.display(), e);
            }
        }
    }

    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(plain_layer)
        .with(json_layer)
        .try_init()
    {
        eprintln!("⚠️  Logging already initialized: {}", e);
    }

    guard
}
