//! Paperfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic of the trading simulator:
//! user accounts, the append-only transaction ledger, and the derived
//! portfolio views. It is database-agnostic and defines the repository
//! traits implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod ledger;
pub mod portfolio;
pub mod quotes;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
