//! PostgreSQL-backed `ProjectRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{IdentityId, Project};

use super::error_mapping::{DbFailure, classify};
use super::models::ProjectRow;
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel implementation of the project port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    ProjectRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    match classify(error) {
        DbFailure::Connection(message) => ProjectRepositoryError::connection(message),
        DbFailure::UniqueViolation(constraint) => ProjectRepositoryError::conflict(constraint),
        DbFailure::MissingRelation(relation) => {
            ProjectRepositoryError::query(format!("relation {relation} does not exist"))
        }
        DbFailure::Query(message) => ProjectRepositoryError::query(message),
    }
}

fn rows_to_projects(rows: Vec<ProjectRow>) -> Result<Vec<Project>, ProjectRepositoryError> {
    rows.into_iter()
        .map(|row| Project::try_from(row).map_err(|err| ProjectRepositoryError::query(err.to_string())))
        .collect()
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(projects::table)
            .values(ProjectRow::from(project))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_by_owner(
        &self,
        owner: &IdentityId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .filter(projects::user_id.eq(owner.as_str()))
            .order(projects::created_at.desc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_projects(rows)
    }

    async fn list_all(&self) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ProjectRow> = projects::table
            .order(projects::updated_at.desc())
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_projects(rows)
    }
}
