use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use paperfolio_core::users::{User, UserError, UserRepositoryTrait};
use paperfolio_core::{Error, Result};

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;

/// Repository for managing user data in the database.
pub struct UserRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, username: &str, password_hash: &str, cash: Decimal) -> Result<User> {
        let username = username.to_string();
        let password_hash = password_hash.to_string();

        self.writer
            .exec(move |conn| {
                let now = Utc::now().naive_utc();
                let new_user = NewUserDB {
                    username: username.clone(),
                    password_hash,
                    cash: cash.to_string(),
                    created_at: now,
                    updated_at: now,
                };

                let inserted = diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning(UserDB::as_returning())
                    .get_result::<UserDB>(conn)
                    .map_err(|e| match e {
                        diesel::result::Error::DatabaseError(
                            diesel::result::DatabaseErrorKind::UniqueViolation,
                            _,
                        ) => Error::from(UserError::UsernameTaken(username.clone())),
                        other => Error::from(crate::errors::StorageError::QueryFailed(other)),
                    })?;

                Ok(User::from(inserted))
            })
            .await
    }

    fn get_by_id(&self, user_id: i64) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user = users::table
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::from(UserError::NotFound(user_id.to_string())))?;

        Ok(user.into())
    }

    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let user = users::table
            .select(UserDB::as_select())
            .filter(users::username.eq(username))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(user.map(User::from))
    }
}
