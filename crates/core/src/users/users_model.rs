//! User domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Domain model for a registered user.
///
/// `cash` is the simulated balance; it is mutated only inside the
/// ledger's atomic apply-transaction path and is never negative after
/// an accepted operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2id hash in PHC string format. Never serialized to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub cash: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    /// Validates the registration input.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.password.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password".to_string(),
            )));
        }
        Ok(())
    }
}
