//! Department repository contract and SQLite implementation.
//!
//! # Invariants
//! - `find_all` is ordered by `name ASC, id ASC`.
//! - Any driver failure while deleting is reported as `RepoError::Integrity`,
//!   since the common cause is sellers still referencing the department.

use super::{ensure_connection_ready, RepoError, RepoResult, DEPARTMENT_COLUMNS};
use crate::model::department::{Department, DepartmentId};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};

const DEPARTMENT_SELECT_SQL: &str = "SELECT
    id,
    name
FROM department";

/// Repository interface for department CRUD operations.
pub trait DepartmentRepository {
    /// Inserts a new row and writes the generated id back onto `department`.
    fn insert(&self, department: &mut Department) -> RepoResult<DepartmentId>;
    fn update(&self, department: &Department) -> RepoResult<()>;
    fn delete_by_id(&self, id: DepartmentId) -> RepoResult<()>;
    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>>;
    fn find_all(&self) -> RepoResult<Vec<Department>>;
}

/// SQLite-backed department repository.
pub struct SqliteDepartmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDepartmentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for a foreign schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[DEPARTMENT_COLUMNS])?;
        Ok(Self { conn })
    }
}

impl DepartmentRepository for SqliteDepartmentRepository<'_> {
    fn insert(&self, department: &mut Department) -> RepoResult<DepartmentId> {
        department.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO department (name) VALUES (?1);",
            params![department.name.as_str()],
        )?;
        if inserted == 0 {
            return Err(RepoError::InsertFailed("department"));
        }

        let id = self.conn.last_insert_rowid();
        department.id = Some(id);
        debug!("event=department_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn update(&self, department: &Department) -> RepoResult<()> {
        let id = department.id.ok_or(RepoError::MissingId("department"))?;
        department.validate()?;

        let changed = self.conn.execute(
            "UPDATE department
             SET name = ?1
             WHERE id = ?2;",
            params![department.name.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "department",
                id,
            });
        }

        debug!("event=department_update module=repo status=ok id={id}");
        Ok(())
    }

    fn delete_by_id(&self, id: DepartmentId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM department WHERE id = ?1;", [id])
            .map_err(|err| {
                warn!(
                    "event=department_delete module=repo status=error error_code=integrity id={id} error={err}"
                );
                RepoError::Integrity(err.to_string())
            })?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "department",
                id,
            });
        }

        debug!("event=department_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_department_row(row)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Department>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEPARTMENT_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut departments = Vec::new();
        while let Some(row) = rows.next()? {
            departments.push(parse_department_row(row)?);
        }

        Ok(departments)
    }
}

fn parse_department_row(row: &Row<'_>) -> RepoResult<Department> {
    Ok(Department::with_id(
        row.get::<_, DepartmentId>("id")?,
        row.get::<_, String>("name")?,
    ))
}
