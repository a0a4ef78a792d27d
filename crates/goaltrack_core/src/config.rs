//! Runtime configuration resolved from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `GOALTRACK_DB_PATH` | `<temp>/goaltrack.sqlite3` |
//! | `GOALTRACK_LOG_DIR` | `<temp>/goaltrack-logs` |
//! | `GOALTRACK_LOG_LEVEL` | `debug` in debug builds, `info` in release |
//!
//! Blank values count as unset.

use crate::logging::LogLevel;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "GOALTRACK_DB_PATH";
pub const LOG_DIR_ENV: &str = "GOALTRACK_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "GOALTRACK_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "goaltrack.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "goaltrack-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    /// Raw level name; validated by `init_logging`.
    pub log_level: String,
}

impl AppConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_dir: non_blank(LOG_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
            log_level: non_blank(LOG_LEVEL_ENV)
                .unwrap_or_else(|| LogLevel::build_default().as_str().to_string()),
        }
    }

    /// Replaces the database path, e.g. from a command-line flag.
    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = db_path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, LOG_LEVEL_ENV};
    use std::path::PathBuf;

    #[test]
    fn unset_and_blank_values_use_defaults() {
        let config = AppConfig::from_lookup(|name| {
            (name == DB_PATH_ENV).then(|| "   ".to_string())
        });
        assert_eq!(
            config.db_path,
            std::env::temp_dir().join("goaltrack.sqlite3")
        );
        assert!(config.log_dir.ends_with("goaltrack-logs"));
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some("/data/goals.db".to_string()),
            LOG_LEVEL_ENV => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/data/goals.db"));
        assert_eq!(config.log_level, "warn");

        let overridden = config.with_db_path("/tmp/other.db");
        assert_eq!(overridden.db_path, PathBuf::from("/tmp/other.db"));
    }
}
