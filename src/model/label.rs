use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: i64,
    pub name: String,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
