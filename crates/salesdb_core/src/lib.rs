//! Data-access layer for sellers and departments.
//! This crate owns the schema, the repositories and the entity invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DatabaseTarget, DbConfig};
pub use db::{
    close_db, open_db, open_db_from_env, open_db_in_memory, open_db_with_config,
    open_db_with_lookup, DbError, DbResult,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::department::{Department, DepartmentId};
pub use model::seller::{Seller, SellerId};
pub use model::ValidationError;
pub use repo::department_repo::{DepartmentRepository, SqliteDepartmentRepository};
pub use repo::seller_repo::{SellerRepository, SqliteSellerRepository};
pub use repo::{DaoFactory, RepoError, RepoResult};
pub use service::department_service::DepartmentService;
pub use service::seller_service::SellerService;

/// Minimal health-check API for smoke runs.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
