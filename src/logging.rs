use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogConfig, LogFormat};

/// File the log layer appends to inside the log directory.
pub const LOG_FILE_NAME: &str = "lexi.log";

/// Keeps the background log writer alive; dropping it flushes the file.
#[allow(dead_code)]
pub struct LogGuard(WorkerGuard);

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize logging.
///
/// Events at `config.level` and above go to `{config.dir}/lexi.log`, as text
/// or JSON lines. Stderr only shows errors unless `verbose` is set, in which
/// case it follows `config.level` too. Commands print their own failures, so
/// warnings stay out of the terminal.
///
/// If the log directory cannot be created, logging falls back to stderr and
/// `None` is returned.
pub fn init(config: &LogConfig, verbose: bool) -> Option<LogGuard> {
    let stderr_filter = level_filter(&stderr_directive(&config.level, verbose));
    let mut layers: Vec<BoxedLayer> = vec![
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .with_filter(stderr_filter)
            .boxed(),
    ];

    let (guard, file_error) = match open_log_file(&config.dir) {
        Ok((writer, path, guard)) => {
            layers.push(file_layer(writer, config));
            (Some((LogGuard(guard), path)), None)
        }
        Err(e) => (None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .ok(); // If already initialized (e.g., in tests), don't crash.

    match (&guard, file_error) {
        (Some((_, path)), _) => {
            tracing::debug!(log_file = %path.display(), format = ?config.format, "writing logs to file");
        }
        (None, Some(e)) => {
            tracing::warn!(error = %format!("{e:#}"), "file logging disabled, logging to stderr only");
        }
        (None, None) => {}
    }

    guard.map(|(guard, _)| guard)
}

fn stderr_directive(level: &str, verbose: bool) -> String {
    if verbose {
        level.to_string()
    } else {
        "error".to_string()
    }
}

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level.trim().to_ascii_lowercase()).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn file_layer(writer: NonBlocking, config: &LogConfig) -> BoxedLayer {
    let filter = level_filter(&config.level);
    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .with_filter(filter)
            .boxed(),
    }
}

fn open_log_file(dir: &Path) -> Result<(NonBlocking, PathBuf, WorkerGuard)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;

    let path = dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    Ok((writer, path, guard))
}

static API_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sk-[A-Za-z0-9_-]{8,}").expect("API key pattern is valid"));

/// Best-effort redaction for OpenAI style API keys (`sk-...`).
pub fn redact_secrets(input: &str) -> String {
    API_KEY.replace_all(input, "sk-***REDACTED***").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn redact_secrets_masks_api_keys() {
        let redacted = redact_secrets("401 for key sk-proj-abcdef123456_XYZ, retry later");

        assert_eq!(redacted, "401 for key sk-***REDACTED***, retry later");
    }

    #[test]
    fn redact_secrets_leaves_short_tokens() {
        assert_eq!(redact_secrets("task sk-1 done"), "task sk-1 done");
        assert_eq!(redact_secrets("no secrets here"), "no secrets here");
    }

    #[test]
    fn stderr_shows_only_errors_unless_verbose() {
        assert_eq!(stderr_directive("INFO", false), "error");
        assert_eq!(stderr_directive("debug", false), "error");
        assert_eq!(stderr_directive("debug", true), "debug");
    }

    #[test]
    #[serial]
    fn init_creates_log_file_in_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            dir: dir.path().join("nested"),
            ..LogConfig::default()
        };

        let guard = init(&config, false);

        assert!(guard.is_some());
        assert!(dir.path().join("nested").join(LOG_FILE_NAME).exists());
    }

    #[test]
    #[serial]
    fn init_without_usable_dir_falls_back_to_stderr() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = LogConfig {
            dir: file.path().join("logs"),
            format: LogFormat::Json,
            ..LogConfig::default()
        };

        assert!(init(&config, true).is_none());
    }
}
