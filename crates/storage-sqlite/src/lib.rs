//! SQLite storage implementation for Paperfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `paperfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users and the transaction ledger
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist. `core` is database-agnostic and works with traits.
//!
//! All mutations flow through a single write actor owning one connection;
//! each job runs inside an immediate transaction. That makes the ledger's
//! guard-check-then-commit sequences atomic and linearized.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod ledger;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from paperfolio-core for convenience
pub use paperfolio_core::errors::{DatabaseError, Error, Result};
