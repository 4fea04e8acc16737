//! Runtime configuration read from the environment.

use std::path::PathBuf;

use crate::client::DEFAULT_MODEL;
use crate::openai::DEFAULT_BASE_URL;

/// Output format of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parses `LOG_FORMAT`; anything other than `json` means text.
    fn from_setting(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Level directive for the log filter (`LOG_LEVEL`)
    pub level: String,
    /// Directory holding `lexi.log` (`LOG_DIR`)
    pub dir: PathBuf,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            dir: PathBuf::from("logs"),
            format: LogFormat::Text,
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `OPENAI_API_KEY`; only required once a command needs the API
    pub api_key: Option<String>,
    /// `OPENAI_MODEL`, falling back to the default model
    pub model: String,
    /// `OPENAI_BASE_URL`
    pub base_url: String,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// Blank values count as unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexi::config::{AppConfig, LogFormat};
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "OPENAI_MODEL" => Some("gpt-4o".to_string()),
    ///     "LOG_FORMAT" => Some("json".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.model, "gpt-4o");
    /// assert_eq!(config.log.format, LogFormat::Json);
    /// assert!(config.api_key.is_none());
    /// ```
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or(defaults.model),
            base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            log: LogConfig {
                level: get("LOG_LEVEL").unwrap_or(defaults.log.level),
                dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log.dir),
                format: get("LOG_FORMAT")
                    .map(|v| LogFormat::from_setting(&v))
                    .unwrap_or_default(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AppConfig::from_lookup(|_| None);

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://api.openai.com/v1");
        assert_eq!(config.log.level, "INFO");
        assert_eq!(config.log.dir, PathBuf::from("logs"));
        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-abc"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1"),
            ("LOG_LEVEL", "debug"),
            ("LOG_DIR", "/tmp/lexi-logs"),
            ("LOG_FORMAT", "JSON"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("sk-abc"));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.dir, PathBuf::from("/tmp/lexi-logs"));
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "   "),
            ("OPENAI_MODEL", ""),
        ]));

        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn unknown_log_format_falls_back_to_text() {
        let config = AppConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "yaml")]));

        assert_eq!(config.log.format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn from_env_reads_process_environment() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe {
            std::env::set_var("OPENAI_MODEL", "gpt-env-test");
        }
        let config = AppConfig::from_env();
        unsafe {
            std::env::remove_var("OPENAI_MODEL");
        }

        assert_eq!(config.model, "gpt-env-test");
    }
}
