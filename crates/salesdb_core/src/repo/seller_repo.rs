//! Seller repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist sellers and hydrate them together with their department
//!   through a single `seller INNER JOIN department` query.
//!
//! # Invariants
//! - List reads build at most one `Department` per distinct department id;
//!   every seller row of that department shares the same `Arc`.
//! - Lists are ordered by `name ASC, id ASC`.
//! - `birth_date` is stored as ISO `YYYY-MM-DD` text.
//! - Reads hydrate every row the schema accepts; only values that cannot be
//!   decoded (e.g. a malformed `birth_date`) fail with `InvalidData`.

use super::{ensure_connection_ready, RepoError, RepoResult, DEPARTMENT_COLUMNS, SELLER_COLUMNS};
use crate::model::department::{Department, DepartmentId};
use crate::model::seller::{Seller, SellerId};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, Params, Row};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

const SELLER_SELECT_SQL: &str = "SELECT
    s.id AS id,
    s.name AS name,
    s.email AS email,
    s.birth_date AS birth_date,
    s.base_salary AS base_salary,
    d.id AS department_id,
    d.name AS department_name
FROM seller s
    INNER JOIN department d ON s.department_id = d.id";

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Repository interface for seller CRUD operations.
pub trait SellerRepository {
    /// Inserts a new row and writes the generated id back onto `seller`.
    fn insert(&self, seller: &mut Seller) -> RepoResult<SellerId>;
    fn update(&self, seller: &Seller) -> RepoResult<()>;
    fn delete_by_id(&self, id: SellerId) -> RepoResult<()>;
    fn find_by_id(&self, id: SellerId) -> RepoResult<Option<Seller>>;
    fn find_all(&self) -> RepoResult<Vec<Seller>>;
    fn find_by_department(&self, department: &Department) -> RepoResult<Vec<Seller>>;
}

/// SQLite-backed seller repository.
pub struct SqliteSellerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSellerRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[DEPARTMENT_COLUMNS, SELLER_COLUMNS])?;
        Ok(Self { conn })
    }

    fn query_list<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Seller>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;

        let mut sellers = Vec::new();
        let mut departments: HashMap<DepartmentId, Arc<Department>> = HashMap::new();

        while let Some(row) = rows.next()? {
            let department_id: DepartmentId = row.get("department_id")?;
            let department = match departments.entry(department_id) {
                Entry::Occupied(entry) => Arc::clone(entry.get()),
                Entry::Vacant(entry) => Arc::clone(entry.insert(Arc::new(parse_department(row)?))),
            };
            sellers.push(parse_seller_row(row, department)?);
        }

        Ok(sellers)
    }
}

impl SellerRepository for SqliteSellerRepository<'_> {
    fn insert(&self, seller: &mut Seller) -> RepoResult<SellerId> {
        seller.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO seller (
                name,
                email,
                birth_date,
                base_salary,
                department_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                seller.name.as_str(),
                seller.email.as_str(),
                seller.birth_date,
                seller.base_salary,
                seller.department.id,
            ],
        )?;
        if inserted == 0 {
            return Err(RepoError::InsertFailed("seller"));
        }

        let id = self.conn.last_insert_rowid();
        seller.id = Some(id);
        debug!("event=seller_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn update(&self, seller: &Seller) -> RepoResult<()> {
        let id = seller.id.ok_or(RepoError::MissingId("seller"))?;
        seller.validate()?;

        let changed = self.conn.execute(
            "UPDATE seller
             SET
                name = ?1,
                email = ?2,
                birth_date = ?3,
                base_salary = ?4,
                department_id = ?5
             WHERE id = ?6;",
            params![
                seller.name.as_str(),
                seller.email.as_str(),
                seller.birth_date,
                seller.base_salary,
                seller.department.id,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "seller",
                id,
            });
        }

        debug!("event=seller_update module=repo status=ok id={id}");
        Ok(())
    }

    fn delete_by_id(&self, id: SellerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM seller WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "seller",
                id,
            });
        }

        debug!("event=seller_delete module=repo status=ok id={id}");
        Ok(())
    }

    fn find_by_id(&self, id: SellerId) -> RepoResult<Option<Seller>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELLER_SELECT_SQL} WHERE s.id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let department = Arc::new(parse_department(row)?);
            return Ok(Some(parse_seller_row(row, department)?));
        }

        Ok(None)
    }

    fn find_all(&self) -> RepoResult<Vec<Seller>> {
        self.query_list(
            &format!("{SELLER_SELECT_SQL} ORDER BY s.name ASC, s.id ASC;"),
            params![],
        )
    }

    fn find_by_department(&self, department: &Department) -> RepoResult<Vec<Seller>> {
        let department_id = department.id.ok_or(RepoError::MissingId("department"))?;
        self.query_list(
            &format!(
                "{SELLER_SELECT_SQL}
                 WHERE s.department_id = ?1
                 ORDER BY s.name ASC, s.id ASC;"
            ),
            [department_id],
        )
    }
}

fn parse_department(row: &Row<'_>) -> RepoResult<Department> {
    Ok(Department::with_id(
        row.get("department_id")?,
        row.get::<_, String>("department_name")?,
    ))
}

fn parse_seller_row(row: &Row<'_>, department: Arc<Department>) -> RepoResult<Seller> {
    let id: SellerId = row.get("id")?;

    let birth_date_text: String = row.get("birth_date")?;
    let birth_date = NaiveDate::parse_from_str(&birth_date_text, BIRTH_DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid birth date `{birth_date_text}` in seller.birth_date (id = {id})"
        ))
    })?;

    Ok(Seller {
        id: Some(id),
        name: row.get("name")?,
        email: row.get("email")?,
        birth_date,
        base_salary: row.get("base_salary")?,
        department,
    })
}
