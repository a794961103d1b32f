//! Repository layer (DAO contracts) and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for sellers and departments.
//! - Isolate SQL text and row hydration from service orchestration.
//! - Translate driver failures into [`RepoError`] variants.
//!
//! # Invariants
//! - Write paths call entity `validate()` before SQL mutations; read paths
//!   do not, so rows stored before a rule existed stay readable.
//! - Repositories only accept connections migrated to the latest schema.
//! - Zero affected rows on update/delete is reported as `NotFound`, never
//!   silently ignored.

pub mod department_repo;
pub mod seller_repo;

use self::department_repo::SqliteDepartmentRepository;
use self::seller_repo::SqliteSellerRepository;
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::ValidationError;
use rusqlite::Connection;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error surface shared by all repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    /// Referential-integrity failure, e.g. deleting a department that still has sellers.
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("{entity} id = {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{0} has no id; it must be inserted first")]
    MissingId(&'static str),
    #[error("no rows written while inserting new {0}")]
    InsertFailed(&'static str),
    #[error("invalid persisted data: {0}")]
    InvalidData(String),
    #[error(
        "connection schema version {actual_version} does not match expected {expected_version}; open it through `db::open_db`"
    )]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) const DEPARTMENT_COLUMNS: (&str, &[&str]) = ("department", &["id", "name"]);
pub(crate) const SELLER_COLUMNS: (&str, &[&str]) = (
    "seller",
    &[
        "id",
        "name",
        "email",
        "birth_date",
        "base_salary",
        "department_id",
    ],
);

/// Verifies that `conn` carries the latest schema and the given tables.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[(&'static str, &[&'static str])],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in tables {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
        let present = stmt
            .query_map([], |row| row.get::<_, String>("name"))?
            .collect::<Result<Vec<_>, _>>()?;

        if present.is_empty() {
            return Err(RepoError::MissingRequiredTable(table));
        }
        if let Some(&column) = columns
            .iter()
            .find(|column| !present.iter().any(|name| name.as_str() == **column))
        {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

/// Hands out repositories that share one connection.
pub struct DaoFactory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> DaoFactory<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn seller_dao(&self) -> RepoResult<SqliteSellerRepository<'conn>> {
        SqliteSellerRepository::try_new(self.conn)
    }

    pub fn department_dao(&self) -> RepoResult<SqliteDepartmentRepository<'conn>> {
        SqliteDepartmentRepository::try_new(self.conn)
    }
}
