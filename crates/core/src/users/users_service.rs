use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::users_errors::UserError;
use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::constants::DEFAULT_STARTING_CASH;
use crate::errors::Result;

/// Service for registration and credential checks.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    starting_cash: Decimal,
}

impl UserService {
    /// Creates a new UserService with the default starting cash.
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self::with_starting_cash(repository, Decimal::from(DEFAULT_STARTING_CASH))
    }

    /// Creates a new UserService granting `starting_cash` to new users.
    pub fn with_starting_cash(
        repository: Arc<dyn UserRepositoryTrait>,
        starting_cash: Decimal,
    ) -> Self {
        Self {
            repository,
            starting_cash,
        }
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;
        Ok(hash.to_string())
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, username: &str, password: &str) -> Result<User> {
        let new_user = NewUser {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        new_user.validate()?;

        debug!("Registering user '{}'", new_user.username);
        let password_hash = Self::hash_password(&new_user.password)?;
        self.repository
            .create(&new_user.username, &password_hash, self.starting_cash)
            .await
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .repository
            .get_by_username(username.trim())?
            .ok_or(UserError::InvalidCredentials)?;

        let parsed =
            PasswordHash::new(&user.password_hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| UserError::InvalidCredentials)?;

        Ok(user)
    }

    fn get_user(&self, user_id: i64) -> Result<User> {
        self.repository.get_by_id(user_id)
    }
}
