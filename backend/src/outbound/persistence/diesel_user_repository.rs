//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{IdentityId, User, Username};

use super::error_mapping::{DbFailure, classify};
use super::models::{RowConversionError, UserRow, UserWrite};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of the user port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => UserRepositoryError::connection(message),
        DbFailure::UniqueViolation(constraint) => UserRepositoryError::conflict(constraint),
        DbFailure::MissingRelation(relation) => UserRepositoryError::missing_schema(relation),
        DbFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn map_row_error(error: RowConversionError) -> UserRepositoryError {
    UserRepositoryError::query(error.to_string())
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserRepositoryError> {
    rows.into_iter()
        .map(|row| User::try_from(row).map_err(map_row_error))
        .collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::try_from).transpose().map_err(map_row_error)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(User::try_from).transpose().map_err(map_row_error)
    }

    async fn find_by_ids(&self, ids: &[IdentityId]) -> Result<Vec<User>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let keys: Vec<&str> = ids.iter().map(IdentityId::as_str).collect();
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(keys))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_users(rows)
    }

    async fn upsert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(UserWrite::from(user))
            .on_conflict(users::id)
            .do_update()
            .set((
                users::username.eq(excluded(users::username)),
                users::email.eq(excluded(users::email)),
                users::display_name.eq(excluded(users::display_name)),
                users::updated_at.eq(excluded(users::updated_at)),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
