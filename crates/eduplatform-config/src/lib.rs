//! # EduPlatform Config
//!
//! Configuration types for EduPlatform, loaded from environment variables:
//!
//! - [`export`]: Default destinations for the export pipeline
//! - [`logging`]: Log level and optional log file directory
//! - [`seed`]: Demo accounts and fake data generated at startup
//!
//! Every config has a `from_env()` constructor and a `from_lookup()`
//! constructor taking any `Fn(&str) -> Option<String>`, so tests can supply
//! values without touching the process environment.
//!
//! # Example
//!
//! ```ignore
//! use eduplatform_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("xlsx goes to {}", config.export.xlsx_path.display());
//! ```

pub mod export;
pub mod logging;
pub mod seed;

// Re-export commonly used types at crate root
pub use export::ExportConfig;
pub use logging::LoggingConfig;
pub use seed::SeedConfig;

/// All application configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub export: ExportConfig,
    pub logging: LoggingConfig,
    pub seed: SeedConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            export: ExportConfig::from_lookup(&lookup),
            logging: LoggingConfig::from_lookup(&lookup),
            seed: SeedConfig::from_lookup(&lookup),
        }
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parses a boolean flag the way the rest of the config does: `true`/`1`
/// (case-insensitive) are true, anything else is false.
pub(crate) fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
