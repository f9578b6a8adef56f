//! SQLite storage layer for userbase.
//!
//! One worker thread owns the `rusqlite` connection; repositories submit work to
//! it through [`Database::execute`].
//!
//! ## Components
//!
//! - [`Database`]: connection worker, migrations, shutdown
//! - [`UserRepository`]: CRUD operations for users
//! - [`PostRepository`]: reads and creation of posts
//! - [`LabelRepository`]: labels attached to posts

mod database;
mod label_repository;
pub mod migrations;
mod post_repository;
mod user_repository;

pub use database::Database;
pub use label_repository::LabelRepository;
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;
