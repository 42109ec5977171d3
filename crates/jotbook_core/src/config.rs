//! Application configuration.
//!
//! # Responsibility
//! - Resolve database path, logging and store policy settings.
//! - Read overrides from `JOTBOOK_*` environment variables.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Invalid values are reported, never silently replaced by defaults.

use crate::logging::default_log_level;
use crate::model::note::TITLE_MAX_CHARS;
use crate::service::note_store::{FirstRunPolicy, StoreOptions};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "JOTBOOK_DB_PATH";
pub const ENV_LOG_DIR: &str = "JOTBOOK_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "JOTBOOK_LOG_LEVEL";
pub const ENV_FIRST_RUN: &str = "JOTBOOK_FIRST_RUN";
pub const ENV_REUSE_EMPTY_NOTE: &str = "JOTBOOK_REUSE_EMPTY_NOTE";

const DEFAULT_DB_FILE_NAME: &str = "jotbook.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub store: StoreOptions,
    pub title_max_chars: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            store: StoreOptions::default(),
            title_max_chars: TITLE_MAX_CHARS,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(policy) = read(ENV_FIRST_RUN) {
            config.store.first_run = policy
                .parse::<FirstRunPolicy>()
                .map_err(|message| ConfigError::InvalidValue {
                    key: ENV_FIRST_RUN,
                    message,
                })?;
        }
        if let Some(flag) = read(ENV_REUSE_EMPTY_NOTE) {
            config.store.reuse_empty_note =
                parse_flag(&flag).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_REUSE_EMPTY_NOTE,
                    message: format!("expected true|false, got `{flag}`"),
                })?;
        }
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_DB_PATH, ENV_FIRST_RUN, ENV_REUSE_EMPTY_NOTE};
    use crate::service::note_store::FirstRunPolicy;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.db_path.ends_with("jotbook.sqlite3"));
        assert_eq!(config.title_max_chars, 40);
    }

    #[test]
    fn overrides_are_trimmed_and_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_DB_PATH, " /tmp/notes.db "),
            (ENV_FIRST_RUN, "empty"),
            (ENV_REUSE_EMPTY_NOTE, "off"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/notes.db"));
        assert_eq!(config.store.first_run, FirstRunPolicy::Empty);
        assert!(!config.store.reuse_empty_note);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_DB_PATH, "   ")])).unwrap();
        assert_eq!(config.db_path, AppConfig::default().db_path);
    }

    #[test]
    fn invalid_flag_is_reported() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_REUSE_EMPTY_NOTE, "maybe")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: ENV_REUSE_EMPTY_NOTE,
                ..
            }
        ));
    }
}
