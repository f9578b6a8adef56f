use async_graphql::ErrorExtensions;
use rusqlite::ErrorCode;
use thiserror::Error;

/// Extension code attached to GraphQL errors for missing records.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Extension code attached to GraphQL errors for rejected input.
pub const VALIDATION: &str = "VALIDATION";

/// Extension code attached to GraphQL errors when the database is unreachable.
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";

/// Extension code for everything else.
pub const INTERNAL: &str = "INTERNAL";

#[derive(Error, Debug)]
pub enum UserbaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Project not initialized. Run 'userbase init' first.")]
    NotInitialized,

    #[error("Project already initialized at {0}")]
    AlreadyInitialized(String),
}

impl UserbaseError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// The machine-readable code clients see under `extensions.code`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => NOT_FOUND,
            Self::Validation(_) => VALIDATION,
            Self::StorageUnavailable(_) => STORAGE_UNAVAILABLE,
            _ => INTERNAL,
        }
    }
}

impl From<rusqlite::Error> for UserbaseError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => Self::Validation(err.to_string()),
            Some(
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::DatabaseCorrupt,
            ) => Self::StorageUnavailable(err.to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}

impl ErrorExtensions for UserbaseError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

pub type Result<T> = std::result::Result<T, UserbaseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_not_found_message() {
        let err = UserbaseError::not_found("User", 42);
        assert_eq!(err.to_string(), "User not found: 42");
        assert_eq!(err.code(), NOT_FOUND);
    }

    #[test]
    fn test_constraint_violation_is_validation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT NOT NULL)")
            .unwrap();
        let err: UserbaseError = conn
            .execute("INSERT INTO t (name) VALUES (NULL)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, UserbaseError::Validation(_)));
    }

    #[test]
    fn test_unknown_table_is_storage_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err: UserbaseError = conn
            .execute("DELETE FROM missing", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, UserbaseError::Storage(_)));
        assert_eq!(err.code(), INTERNAL);
    }

    #[test]
    fn test_extension_code_attached() {
        let err = UserbaseError::StorageUnavailable("gone".to_string()).extend();
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::from(STORAGE_UNAVAILABLE)));
    }
}
