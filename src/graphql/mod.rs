//! GraphQL schema, resolvers and HTTP endpoint for userbase.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! userbase serve --port 3000
//!
//! # Execute a query from CLI
//! userbase query 'users { id name email }'
//!
//! # Execute a mutation from CLI
//! userbase mutate 'createUser(name: "Bob") { user { id } }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `users`, `user`, `posts`, `post`
//! - **Mutations**: `createUser`, `updateUser`, `deleteUser`, `createPost`, `createLabel`

mod schema;
mod server;
mod types;

pub use schema::{MutationRoot, QueryRoot, UserbaseSchema, build_schema, schema_sdl};
pub use server::{GRAPHQL_PATH, router, run_server};
pub use types::*;
