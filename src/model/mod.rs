//! Data models for userbase.
//!
//! - [`User`]: the managed entity, with [`NewUser`] and [`UserChanges`] as the
//!   typed arguments of its create and update operations
//! - [`Post`]: belongs to a user
//! - [`Label`]: attached to a post

mod label;
mod post;
mod user;

pub use label::Label;
pub use post::Post;
pub use user::{NewUser, User, UserChanges};

use chrono::{DateTime, Utc};

/// Next `updated_at` for a record: never earlier than the previous value.
pub(crate) fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}
