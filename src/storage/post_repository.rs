use chrono::Utc;
use rusqlite::{Row, params};

use super::database::{Database, format_datetime, parse_datetime};
use crate::{
    error::{Result, UserbaseError},
    model::Post,
};

fn row_to_post(row: &Row) -> Result<Post> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Post {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

#[derive(Clone)]
pub struct PostRepository {
    db: Database,
}

impl PostRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_all(&self) -> Result<Vec<Post>> {
        self.db
            .execute(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, user_id, created_at, updated_at FROM posts ORDER BY id ASC",
                )?;
                let mut rows = stmt.query([])?;
                let mut posts = Vec::new();
                while let Some(row) = rows.next()? {
                    posts.push(row_to_post(row)?);
                }
                Ok(posts)
            })
            .await
    }

    pub async fn find(&self, id: i64) -> Result<Post> {
        self.db
            .execute(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, user_id, created_at, updated_at FROM posts WHERE id = ?1",
                )?;
                let mut rows = stmt.query(params![id])?;
                match rows.next()? {
                    Some(row) => row_to_post(row),
                    None => Err(UserbaseError::not_found("Post", id)),
                }
            })
            .await
    }

    /// Create a post owned by `user_id`. Fails with `NotFound` for an unknown user.
    pub async fn create(&self, user_id: i64) -> Result<Post> {
        tracing::info!(user_id, "Creating post");

        self.db
            .execute(move |conn| {
                let owner_exists: bool = conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                    params![user_id],
                    |row| row.get(0),
                )?;
                if !owner_exists {
                    return Err(UserbaseError::not_found("User", user_id));
                }

                let now = Utc::now();
                conn.execute(
                    "INSERT INTO posts (user_id, created_at, updated_at) VALUES (?1, ?2, ?3)",
                    params![user_id, format_datetime(now), format_datetime(now)],
                )?;

                Ok(Post {
                    id: conn.last_insert_rowid(),
                    user_id,
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
    use crate::storage::UserRepository;

    #[tokio::test]
    async fn test_create_and_find_post() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().await.unwrap();
        let user = UserRepository::new(&db)
            .create(NewUser::new("Bob"))
            .await
            .unwrap();

        let repo = PostRepository::new(&db);
        let post = repo.create(user.id).await.unwrap();
        assert_eq!(post.user_id, user.id);
        assert_eq!(repo.find(post.id).await.unwrap(), post);
        assert_eq!(repo.find_all().await.unwrap(), vec![post]);
    }

    #[tokio::test]
    async fn test_create_for_unknown_user() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().await.unwrap();
        let repo = PostRepository::new(&db);
        assert!(matches!(
            repo.create(5).await,
            Err(UserbaseError::NotFound { entity: "User", .. })
        ));
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_cannot_be_deleted_while_posts_exist() {
        let db = Database::open_in_memory().unwrap();
        db.migrate().await.unwrap();
        let users = UserRepository::new(&db);
        let user = users.create(NewUser::new("Bob")).await.unwrap();
        PostRepository::new(&db).create(user.id).await.unwrap();

        assert!(matches!(
            users.delete(user.id).await,
            Err(UserbaseError::Validation(_))
        ));
        assert_eq!(users.find(user.id).await.unwrap(), user);
    }
}
