use chrono::Utc;
use rusqlite::{Row, params};

use super::database::{Database, format_datetime, parse_datetime};
use crate::{
    error::{Result, UserbaseError},
    model::{NewUser, User},
    validation,
};

const USER_COLUMNS: &str = "id, name, email, created_at, updated_at";

fn row_to_user(row: &Row) -> Result<User> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

/// CRUD access to the `users` table.
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// All users in insertion order.
    pub async fn find_all(&self) -> Result<Vec<User>> {
        self.db
            .execute(|conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id ASC"))?;
                let mut rows = stmt.query([])?;
                let mut users = Vec::new();
                while let Some(row) = rows.next()? {
                    users.push(row_to_user(row)?);
                }
                Ok(users)
            })
            .await
    }

    pub async fn find(&self, id: i64) -> Result<User> {
        self.db
            .execute(move |conn| {
                let mut stmt =
                    conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"))?;
                let mut rows = stmt.query(params![id])?;
                match rows.next()? {
                    Some(row) => row_to_user(row),
                    None => Err(UserbaseError::not_found("User", id)),
                }
            })
            .await
    }

    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        tracing::info!(name = %new_user.name, "Creating user");

        self.db
            .execute(move |conn| {
                let now = Utc::now();
                conn.execute(
                    "INSERT INTO users (name, email, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        new_user.name,
                        new_user.email,
                        format_datetime(now),
                        format_datetime(now)
                    ],
                )?;

                Ok(User {
                    id: conn.last_insert_rowid(),
                    name: new_user.name,
                    email: new_user.email,
                    created_at: now,
                    updated_at: now,
                })
            })
            .await
    }

    /// Persist every mutable column of `user` and return the stored row.
    ///
    /// `updated_at` is clamped against the stored value, so a stale copy
    /// written late never moves it backwards. Fails with `NotFound` if the
    /// row is gone.
    pub async fn update(&self, user: &User) -> Result<User> {
        validation::validate_name(&user.name)?;
        validation::validate_optional_email(user.email.as_deref())?;
        tracing::info!(id = user.id, name = %user.name, "Updating user");

        let record = user.clone();
        self.db
            .execute(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "UPDATE users
                     SET name = ?1,
                         email = ?2,
                         updated_at = MAX(updated_at, ?3)
                     WHERE id = ?4
                     RETURNING {USER_COLUMNS}"
                ))?;
                let mut rows = stmt.query(params![
                    record.name,
                    record.email,
                    format_datetime(record.updated_at),
                    record.id
                ])?;
                match rows.next()? {
                    Some(row) => row_to_user(row),
                    None => Err(UserbaseError::not_found("User", record.id)),
                }
            })
            .await
    }

    /// Permanently remove a user. Posts still referencing it make this fail.
    pub async fn delete(&self, id: i64) -> Result<()> {
        tracing::info!(id, "Deleting user");

        self.db
            .execute(move |conn| {
                let changed = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
                if changed == 0 {
                    return Err(UserbaseError::not_found("User", id));
                }
                Ok(())
            })
            .await
    }
}
