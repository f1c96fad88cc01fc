//! User-related error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    /// The requested username is already registered.
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// Unknown username or wrong password. Deliberately does not say which.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(String),

    /// The stored password hash could not be parsed or a hash operation failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
