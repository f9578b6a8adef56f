use rusqlite::{Connection, Transaction};

use crate::error::{Result, UserbaseError};

pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Bring the schema up to [`CURRENT_SCHEMA_VERSION`], returning the version it started at.
///
/// Only the `migrate` command calls this; the server expects an already migrated database.
pub fn run_migrations(conn: &mut Connection) -> Result<i32> {
    let start: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if start > CURRENT_SCHEMA_VERSION {
        return Err(UserbaseError::Storage(format!(
            "database version ({}) is newer than supported schema ({})",
            start, CURRENT_SCHEMA_VERSION
        )));
    }

    if start == CURRENT_SCHEMA_VERSION {
        return Ok(start);
    }

    let tx = conn.transaction()?;

    let mut version = start;
    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        tracing::info!(version = next_version, "Applying schema migration");
        apply_migration(&tx, next_version)?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)?;
    tx.commit()?;

    Ok(start)
}

pub fn schema_version(conn: &Connection) -> Result<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> Result<()> {
    match version {
        1 => {
            tx.execute_batch(include_str!("schemas/schema_v1.sql"))?;
            Ok(())
        }
        _ => Err(UserbaseError::Storage(format!(
            "no migration defined for version {}",
            version
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&mut conn).unwrap(), 0);
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_SCHEMA_VERSION);

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('users', 'posts', 'labels')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        assert_eq!(run_migrations(&mut conn).unwrap(), CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_database_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION + 1)
            .unwrap();
        assert!(run_migrations(&mut conn).is_err());
    }
}
