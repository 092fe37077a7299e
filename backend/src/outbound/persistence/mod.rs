//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between row structs (`models.rs`) and domain
//! records; no business rules live here. Connections come from a `bb8` pool
//! over `diesel-async`, and every database failure is reduced by
//! `error_mapping` before becoming a port error.

mod diesel_project_repository;
mod diesel_publish_share_repository;
mod diesel_template_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_publish_share_repository::DieselPublishShareRepository;
pub use diesel_template_repository::DieselTemplateRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
