use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use tokio::sync::oneshot;

use super::migrations;
use crate::error::{Result, UserbaseError};

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct DatabaseInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl DatabaseInner {
    fn shutdown(&self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                tracing::error!("Failed to send shutdown to database thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                tracing::error!("Failed to join database thread: {join_err:?}");
            }
        }
    }
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Handle to the SQLite database.
///
/// A single worker thread owns the connection; every call is shipped to it as a
/// closure and answered over a oneshot channel. Clones share the worker.
#[derive(Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
    location: Arc<String>,
}

impl Database {
    /// Open (or create) the database file at `path`.
    pub fn open(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| {
                UserbaseError::StorageUnavailable(format!(
                    "failed to create database directory {}: {}",
                    parent.display(),
                    err
                ))
            })?;
        }

        let location = path.display().to_string();
        Self::spawn(location, move || Connection::open(&path))
    }

    /// Open a private in-memory database, mostly useful for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::spawn(":memory:".to_string(), Connection::open_in_memory)
    }

    fn spawn<F>(location: String, open: F) -> Result<Self>
    where
        F: FnOnce() -> rusqlite::Result<Connection> + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let thread_location = location.clone();

        let worker = thread::Builder::new()
            .name("userbase-db".into())
            .spawn(move || {
                let mut conn = match open() {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(UserbaseError::StorageUnavailable(format!(
                            "failed to open database {}: {}",
                            thread_location, err
                        ))));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "foreign_keys", "ON") {
                    let _ = ready_tx.send(Err(err.into()));
                    return;
                }
                if let Err(err) =
                    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                        row.get::<_, String>(0)
                    })
                {
                    tracing::warn!("Failed to enable WAL mode: {err}");
                }

                if ready_tx.send(Ok(())).is_err() {
                    tracing::error!("Database readiness receiver dropped");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => task(&mut conn),
                        DbCommand::Shutdown => break,
                    }
                }

                tracing::info!(location = %thread_location, "Database thread shutting down");
            })?;

        ready_rx.recv().map_err(|_| {
            UserbaseError::StorageUnavailable(
                "database worker exited before signaling readiness".to_string(),
            )
        })??;

        tracing::debug!(location = %location, "Database opened");

        Ok(Self {
            inner: Arc::new(DatabaseInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            location: Arc::new(location),
        })
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Run `task` against the connection on the worker thread.
    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                tracing::debug!("Database caller dropped before receiving result");
            }
        }));

        self.inner.sender.send(command).map_err(|_| {
            UserbaseError::StorageUnavailable("database worker is not running".to_string())
        })?;

        reply_rx.await.map_err(|_| {
            UserbaseError::StorageUnavailable("database thread terminated unexpectedly".to_string())
        })?
    }

    /// Apply pending schema migrations. Returns `(from, to)` schema versions.
    pub async fn migrate(&self) -> Result<(i32, i32)> {
        self.execute(|conn| {
            let from = migrations::run_migrations(conn)?;
            let to = migrations::schema_version(conn)?;
            Ok((from, to))
        })
        .await
    }

    /// Stop the worker thread. Every later call fails with `StorageUnavailable`.
    pub fn close(&self) {
        self.inner.shutdown();
    }
}

/// Fixed-width UTC text, so SQLite's text ordering (and `MAX`) matches time order.
pub(crate) fn format_datetime(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_datetime(value: &str, column: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| UserbaseError::Storage(format!("invalid {column} '{value}': {err}")))
}
