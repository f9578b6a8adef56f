use std::path::Path;

use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, UserbaseError};

const DEFAULT_LOG_FILE_NAME: &str = "userbase.log";

/// Install the global subscriber: compact events on stderr, plus a daily
/// rotated JSON file when `log_file` is set.
///
/// `RUST_LOG` overrides the default `userbase=info` (or `debug` with `verbose`).
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("userbase={}", default_level)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer);

    let installed = match log_file {
        Some(path) => {
            let file_layer = fmt::layer()
                .with_writer(file_appender(path)?)
                .with_ansi(false)
                .json();
            subscriber.with(file_layer).try_init()
        }
        None => subscriber.try_init(),
    };
    installed.map_err(|err| UserbaseError::Config(format!("Failed to install logger: {err}")))
}

/// Daily appender writing `<file name>.<date>` next to `path`, creating the
/// directory if needed.
pub fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string());
    Ok(rolling::daily(directory, file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::registry;

    fn log_lines(dir: &Path, prefix: &str) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
            })
            .flat_map(|p| {
                std::fs::read_to_string(p)
                    .unwrap()
                    .lines()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn test_file_appender_writes_json_events() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs/nested");
        let appender = file_appender(&log_dir.join("app.log")).unwrap();

        let subscriber = registry().with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .json(),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(user_id = 7, "user created");
        });

        let lines = log_lines(&log_dir, "app.log");
        assert_eq!(lines.len(), 1);
        let event: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(event["level"], "INFO");
        assert_eq!(event["fields"]["message"], "user created");
        assert_eq!(event["fields"]["user_id"], 7);
    }

    #[test]
    fn test_file_appender_reports_unusable_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = file_appender(&blocker.join("app.log")).unwrap_err();
        assert!(matches!(err, UserbaseError::Io(_)));
    }

    #[test]
    fn test_init_fails_when_a_subscriber_is_already_installed() {
        let _ = registry().try_init();
        let temp_dir = TempDir::new().unwrap();
        let err = init(false, Some(&temp_dir.path().join("app.log"))).unwrap_err();
        assert!(matches!(err, UserbaseError::Config(_)));
    }
}
