//! PostgreSQL-backed `TemplateRepository`.
//!
//! View counting is a single `UPDATE ... SET views = views + 1 RETURNING *` so
//! concurrent readers never lose an increment.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TemplateRepository, TemplateRepositoryError};
use crate::domain::{IdentityId, Template};

use super::error_mapping::{DbFailure, classify};
use super::models::TemplateRow;
use super::pool::{DbPool, PoolError};
use super::schema::templates;

/// Diesel implementation of the template port.
#[derive(Clone)]
pub struct DieselTemplateRepository {
    pool: DbPool,
}

impl DieselTemplateRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TemplateRepositoryError {
    TemplateRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> TemplateRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => TemplateRepositoryError::connection(message),
        DbFailure::UniqueViolation(constraint) => TemplateRepositoryError::conflict(constraint),
        DbFailure::MissingRelation(relation) => {
            TemplateRepositoryError::query(format!("relation {relation} does not exist"))
        }
        DbFailure::Query(message) => TemplateRepositoryError::query(message),
    }
}

fn row_to_template(row: TemplateRow) -> Result<Template, TemplateRepositoryError> {
    Template::try_from(row).map_err(|err| TemplateRepositoryError::query(err.to_string()))
}

#[async_trait]
impl TemplateRepository for DieselTemplateRepository {
    async fn insert(&self, template: &Template) -> Result<(), TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(templates::table)
            .values(TemplateRow::from(template))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_all(&self) -> Result<Vec<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TemplateRow> = templates::table
            .order(templates::created_at.desc())
            .select(TemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_template).collect()
    }

    async fn list_by_owner(
        &self,
        owner: &IdentityId,
    ) -> Result<Vec<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TemplateRow> = templates::table
            .filter(templates::user_id.eq(owner.as_str()))
            .order(templates::created_at.desc())
            .select(TemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_template).collect()
    }

    async fn record_view(&self, slug: &str) -> Result<Option<Template>, TemplateRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TemplateRow> = diesel::update(templates::table.filter(templates::slug.eq(slug)))
            .set(templates::views.eq(templates::views + 1))
            .returning(TemplateRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_template).transpose()
    }
}
