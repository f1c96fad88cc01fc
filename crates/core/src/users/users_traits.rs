//! User repository and service traits.
//!
//! These traits define the contract for user operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::users_model::User;
use crate::errors::Result;

/// Contract for user persistence.
///
/// Cash is readable through this trait but mutated only by the ledger
/// repository, inside the same commit scope as the transaction insert.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts a new user with the given password hash and starting cash.
    ///
    /// Returns `UserError::UsernameTaken` when the username exists.
    async fn create(&self, username: &str, password_hash: &str, cash: Decimal) -> Result<User>;

    /// Retrieves a user by id.
    fn get_by_id(&self, user_id: i64) -> Result<User>;

    /// Retrieves a user by username, `None` when unknown.
    fn get_by_username(&self, username: &str) -> Result<Option<User>>;
}

/// Contract for user business operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Registers a new user with a hashed password and starting cash.
    async fn register(&self, username: &str, password: &str) -> Result<User>;

    /// Verifies credentials, returning the user on success.
    fn authenticate(&self, username: &str, password: &str) -> Result<User>;

    /// Retrieves a user by id.
    fn get_user(&self, user_id: i64) -> Result<User>;
}
