//! Seller entity.
//!
//! # Invariants
//! - `department` is shared, not copied: sellers hydrated from one list
//!   query that belong to the same department point at the same allocation.
//! - `base_salary` is finite and non-negative for every persisted seller.

use super::department::Department;
use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Database-assigned seller identifier.
pub type SellerId = i64;

/// Sales employee attached to one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    /// `None` until the seller is inserted.
    pub id: Option<SellerId>,
    pub name: String,
    pub email: String,
    /// Serialized as ISO `YYYY-MM-DD`.
    pub birth_date: NaiveDate,
    pub base_salary: f64,
    pub department: Arc<Department>,
}

impl Seller {
    /// Creates an unsaved seller.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: impl Into<Arc<Department>>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department: department.into(),
        }
    }

    /// Checks write-side invariants.
    ///
    /// # Errors
    /// - `BlankName` for an empty name.
    /// - `InvalidEmail` when the address is blank or has no `@`.
    /// - `InvalidBaseSalary` for NaN, infinite or negative salaries.
    /// - `UnsavedDepartment` when the department has no id yet.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName { entity: "seller" });
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        if !self.base_salary.is_finite() || self.base_salary < 0.0 {
            return Err(ValidationError::InvalidBaseSalary(self.base_salary));
        }
        if !self.department.is_persisted() {
            return Err(ValidationError::UnsavedDepartment);
        }
        Ok(())
    }

    /// Points this seller at another department.
    pub fn move_to(&mut self, department: impl Into<Arc<Department>>) {
        self.department = department.into();
    }
}
