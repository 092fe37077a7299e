//! PostgreSQL-backed `PublishShareRepository`.
//!
//! Shares are written by the external IDE; this adapter only reads them.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::PublishShare;
use crate::domain::ports::{PublishShareRepository, PublishShareRepositoryError};

use super::error_mapping::{DbFailure, classify};
use super::models::PublishShareRow;
use super::pool::{DbPool, PoolError};
use super::schema::publish_shares;

#[derive(Clone)]
pub struct DieselPublishShareRepository {
    pool: DbPool,
}

impl DieselPublishShareRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PublishShareRepositoryError {
    PublishShareRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> PublishShareRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => PublishShareRepositoryError::connection(message),
        DbFailure::UniqueViolation(message) | DbFailure::Query(message) => {
            PublishShareRepositoryError::query(message)
        }
        DbFailure::MissingRelation(relation) => {
            PublishShareRepositoryError::query(format!("relation {relation} does not exist"))
        }
    }
}

#[async_trait]
impl PublishShareRepository for DieselPublishShareRepository {
    async fn find_by_share_id(
        &self,
        share_id: &str,
    ) -> Result<Option<PublishShare>, PublishShareRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PublishShareRow> = publish_shares::table
            .filter(publish_shares::share_id.eq(share_id))
            .select(PublishShareRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(PublishShare::from))
    }
}
