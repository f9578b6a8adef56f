//! # Userbase - a small GraphQL API for managing users
//!
//! Userbase exposes create, read, update and delete operations on users (plus
//! read access to their posts and labels) over a single `POST /graphql`
//! endpoint, backed by SQLite.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write .userbase.yml in the current directory
//! userbase init
//!
//! # Create the database schema
//! userbase migrate
//!
//! # Serve the API (GraphiQL at /graphiql in development)
//! userbase serve --port 3000
//!
//! # Or talk to the schema directly
//! userbase mutate 'createUser(name: "Bob", email: "bob@x.com") { user { id } }'
//! userbase query 'users { id name email }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP endpoint
//! - [`model`]: Data models (User, Post, Label)
//! - [`storage`]: SQLite storage and repositories
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.userbase.yml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `UserbaseError` enum, its GraphQL error codes and `Result<T>`.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides the async-graphql schema and the axum router serving it.
pub mod graphql;

/// Data models for users, posts and labels.
pub mod model;

/// SQLite storage layer.
///
/// A dedicated connection thread plus one repository per table.
pub mod storage;

/// Input validation utilities.
///
/// Validates names, emails and identifiers before anything is written.
pub mod validation;

pub mod logging;
