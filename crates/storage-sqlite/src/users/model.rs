//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use paperfolio_core::users::User;

/// Parses a stored decimal column, falling back to zero on corrupt data
/// rather than failing the whole read.
pub(crate) fn parse_decimal_column(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            Decimal::ZERO
        }
    }
}

/// Database model for users.
#[derive(
    Queryable, Identifiable, Selectable, AsChangeset, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub cash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insert model; the id comes from the rowid on insert.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub username: String,
    pub password_hash: String,
    pub cash: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        let cash = parse_decimal_column(&db.cash, "users.cash");
        User {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            cash,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
