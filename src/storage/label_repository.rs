use chrono::Utc;
use rusqlite::{Row, params};

use super::database::{Database, format_datetime, parse_datetime};
use crate::{
    error::{Result, UserbaseError},
    model::Label,
    validation,
};

fn row_to_label(row: &Row) -> Result<Label> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Label {
        id: row.get("id")?,
        name: row.get("name")?,
        post_id: row.get("post_id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

#[derive(Clone)]
pub struct LabelRepository {
    db: Database,
}

impl LabelRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    /// The label attached to a post; the oldest one if there are several.
    pub async fn find_for_post(&self, post_id: i64) -> Result<Option<Label>> {
        self.db
            .execute(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, post_id, created_at, updated_at
                     FROM labels
                     WHERE post_id = ?1
                     ORDER BY id ASC
                     LIMIT 1",
                )?;
                let mut rows = stmt.query(params![post_id])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row_to_label(row)?)),
                    None => Ok(None),
                }
            })
            .await
    }

    pub async fn create(&self, post_id: i64, name: String) -> Result<Label> {
        validation::validate_label_name(&name)?;
        tracing::info!(post_id, name = %name, "Creating label");

        self.db
            .execute(move |conn| {
                let post_exists: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?1)",
                    params![post_id],
                    |row| row.get(0),
                )?;
                if !post_exists {
                    return Err(UserbaseError::not_found("Post", post_id));
                }

                let now = Utc::now();
                conn.execute(
                    "INSERT INTO labels (name, post_id, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![name, post_id, format_datetime(now), format_datetime(now)],
                )?;

                Ok(Label {
                    id: conn.last_insert_rowid(),
                    name,
                    post_id,
                    created_at: now,
                    updated_at: now,
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewUser;
    use crate::storage::{PostRepository, UserRepository};

    async fn setup_post(db: &Database) -> i64 {
        let user = UserRepository::new(db)
            .create(NewUser::new("Bob"))
            .await
            .unwrap();
        PostRepository::new(db).create(user.id).await.unwrap().id
    }

    #[tokio::test]
    async fn test_post_without_label() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().await.unwrap();
        let post_id = setup_post(&db).await;
        let repo = LabelRepository::new(&db);
        assert_eq!(repo.find_for_post(post_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_oldest_label_wins() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().await.unwrap();
        let post_id = setup_post(&db).await;
        let repo = LabelRepository::new(&db);

        let first = repo.create(post_id, "bug".to_string()).await.unwrap();
        repo.create(post_id, "urgent".to_string()).await.unwrap();

        assert_eq!(repo.find_for_post(post_id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_create_for_unknown_post() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().await.unwrap();
        let repo = LabelRepository::new(&db);
        assert!(matches!(
            repo.create(3, "bug".to_string()).await,
            Err(UserbaseError::NotFound { entity: "Post", .. })
        ));
        assert!(matches!(
            repo.create(3, "".to_string()).await,
            Err(UserbaseError::Validation(_))
        ));
    }
}
