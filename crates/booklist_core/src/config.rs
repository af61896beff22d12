//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve slot database path, slot key, notification TTL and logging knobs.
//! - Reject malformed values up front instead of at first use.
//!
//! # Invariants
//! - Blank variables behave as unset and fall back to defaults.
//! - Resolution is pure over the provided lookup; `from_env` is a thin wrapper.

use crate::logging::{default_log_level, normalize_level};
use crate::repo::book_repo::DEFAULT_SLOT_KEY;
use crate::ui::notification::DEFAULT_NOTIFICATION_TTL;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_PATH: &str = "BOOKLIST_DB_PATH";
pub const ENV_SLOT_KEY: &str = "BOOKLIST_SLOT_KEY";
pub const ENV_NOTIFICATION_TTL_MS: &str = "BOOKLIST_NOTIFICATION_TTL_MS";
pub const ENV_LOG_LEVEL: &str = "BOOKLIST_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "BOOKLIST_LOG_DIR";

const DB_FILE_NAME: &str = "booklist.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { var, value, reason } => {
                write!(f, "invalid {var}=`{value}`: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Effective runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListConfig {
    pub db_path: PathBuf,
    pub slot_key: String,
    pub notification_ttl: Duration,
    pub log_level: &'static str,
    /// `None` keeps file logging off.
    pub log_dir: Option<PathBuf>,
}

impl Default for BookListConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DB_FILE_NAME),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl BookListConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolves settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &str| {
            lookup(var)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(key) = read(ENV_SLOT_KEY) {
            config.slot_key = key;
        }
        if let Some(raw) = read(ENV_NOTIFICATION_TTL_MS) {
            config.notification_ttl = parse_ttl(&raw)?;
        }
        if let Some(raw) = read(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&raw).map_err(|reason| invalid(ENV_LOG_LEVEL, &raw, reason))?;
        }
        if let Some(raw) = read(ENV_LOG_DIR) {
            if !Path::new(&raw).is_absolute() {
                return Err(invalid(ENV_LOG_DIR, &raw, "must be an absolute path"));
            }
            config.log_dir = Some(PathBuf::from(raw));
        }

        Ok(config)
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(invalid(ENV_NOTIFICATION_TTL_MS, raw, "must be greater than zero")),
        Ok(millis) => Ok(Duration::from_millis(millis)),
        Err(err) => Err(invalid(ENV_NOTIFICATION_TTL_MS, raw, err.to_string())),
    }
}

fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::{BookListConfig, ConfigError, ENV_LOG_DIR, ENV_NOTIFICATION_TTL_MS};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn resolve(pairs: &[(&str, &str)]) -> Result<BookListConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        BookListConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = resolve(&[]).unwrap();
        assert_eq!(config, BookListConfig::default());
        assert_eq!(config.slot_key, "books");
        assert_eq!(config.notification_ttl, Duration::from_secs(3));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn overrides_are_trimmed_and_applied() {
        let config = resolve(&[
            ("BOOKLIST_DB_PATH", " /data/books.sqlite3 "),
            ("BOOKLIST_SLOT_KEY", "library"),
            ("BOOKLIST_NOTIFICATION_TTL_MS", "1500"),
            ("BOOKLIST_LOG_LEVEL", "WARNING"),
            ("BOOKLIST_SLOT_KEY_UNUSED", "x"),
        ])
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/books.sqlite3"));
        assert_eq!(config.slot_key, "library");
        assert_eq!(config.notification_ttl, Duration::from_millis(1500));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = resolve(&[("BOOKLIST_SLOT_KEY", "   ")]).unwrap();
        assert_eq!(config.slot_key, "books");
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (var, value) in [
            (ENV_NOTIFICATION_TTL_MS, "0"),
            (ENV_NOTIFICATION_TTL_MS, "soon"),
            (ENV_LOG_DIR, "logs/dev"),
            ("BOOKLIST_LOG_LEVEL", "verbose"),
        ] {
            let err = resolve(&[(var, value)]).expect_err("value should be rejected");
            assert!(err.to_string().contains(var), "{err}");
        }
    }
}
