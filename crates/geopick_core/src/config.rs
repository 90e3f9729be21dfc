//! Runtime configuration for the picker front ends.
//!
//! # Responsibility
//! - Resolve the directory base URL, store path and logging settings.
//! - Apply environment overrides on top of built-in defaults.
//!
//! # Invariants
//! - Blank environment values are ignored, never applied.
//! - `validate()` must pass before a picker service is built from the config.

use crate::directory::client::DEFAULT_BASE_URL;
use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_BASE_URL: &str = "GEOPICK_BASE_URL";
pub const ENV_DB_PATH: &str = "GEOPICK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "GEOPICK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "GEOPICK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "geopick.sqlite3";

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBaseUrl(String),
    EmptyPath(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "base url must start with http:// or https://, got `{value}`")
            }
            Self::EmptyPath(field) => write!(f, "{field} cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved settings shared by the CLI and FFI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub db_path: PathBuf,
    pub log_level: String,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `GEOPICK_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(base_url) = read(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(db_path) = read(ENV_DB_PATH) {
            self.db_path = PathBuf::from(db_path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(log_dir) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(log_dir));
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("db_path"));
        }
        if matches!(&self.log_dir, Some(dir) if dir.as_os_str().is_empty()) {
            return Err(ConfigError::EmptyPath("log_dir"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ENV_BASE_URL, ENV_DB_PATH, ENV_LOG_DIR};
    use crate::directory::client::DEFAULT_BASE_URL;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_target_public_directory() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.log_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_apply_trimmed_values_and_skip_blanks() {
        let config = AppConfig::default().with_overrides(lookup(&[
            (ENV_BASE_URL, " http://127.0.0.1:9000 "),
            (ENV_DB_PATH, "   "),
            (ENV_LOG_DIR, "/var/log/geopick"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.db_path, AppConfig::default().db_path);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/geopick")));
    }

    #[test]
    fn validate_rejects_schemeless_base_url() {
        let config = AppConfig {
            base_url: "jsonplaceholder.typicode.com".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }
}
