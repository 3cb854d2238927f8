//! Logging configuration.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: Level for EduPlatform crates on the console (default: `warn`)
//! - `LOG_DIR`: When set, a daily-rolling log file is written there
//! - `LOG_JSON`: Write the log file as JSON lines (default: `false`)
//!
//! `RUST_LOG`, when present, overrides the console filter entirely.

use std::path::PathBuf;

/// The console is shared with interactive menus, so the default keeps it
/// quiet and leaves `info` output to the log file.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub log_dir: Option<PathBuf>,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
            json: false,
        }
    }
}

impl LoggingConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(crate::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            level: lookup("LOG_LEVEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_dir: lookup("LOG_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            json: lookup("LOG_JSON")
                .map(|v| crate::parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert!(config.log_dir.is_none());
        assert!(!config.json);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = LoggingConfig::from_lookup(|key| match key {
            "LOG_LEVEL" | "LOG_DIR" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_log_dir_and_json() {
        let config = LoggingConfig::from_lookup(|key| match key {
            "LOG_DIR" => Some("storage/logs".to_string()),
            "LOG_JSON" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.log_dir, Some(PathBuf::from("storage/logs")));
        assert!(config.json);
    }
}
