use crate::model::{Label as ModelLabel, Post as ModelPost, User as ModelUser};
use async_graphql::{ID, SimpleObject};

#[derive(SimpleObject, Clone)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ModelUser> for User {
    fn from(u: ModelUser) -> Self {
        Self {
            id: ID::from(u.id.to_string()),
            name: u.name,
            email: u.email,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject, Clone)]
#[graphql(complex)]
pub struct Post {
    pub id: ID,
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,

    #[graphql(skip)]
    pub row_id: i64,
}

impl From<ModelPost> for Post {
    fn from(p: ModelPost) -> Self {
        Self {
            id: ID::from(p.id.to_string()),
            user_id: p.user_id,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
            row_id: p.id,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct Label {
    pub id: ID,
    pub name: String,
    pub post_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ModelLabel> for Label {
    fn from(l: ModelLabel) -> Self {
        Self {
            id: ID::from(l.id.to_string()),
            name: l.name,
            post_id: l.post_id,
            created_at: l.created_at.to_rfc3339(),
            updated_at: l.updated_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct CreateUserPayload {
    pub user: Option<User>,
}

#[derive(SimpleObject)]
pub struct UpdateUserPayload {
    pub user: Option<User>,
}

/// Carries the deleted user's last-known values.
#[derive(SimpleObject)]
pub struct DeleteUserPayload {
    pub user: Option<User>,
}

#[derive(SimpleObject)]
pub struct CreatePostPayload {
    pub post: Option<Post>,
}

#[derive(SimpleObject)]
pub struct CreateLabelPayload {
    pub label: Option<Label>,
}
