//! Department entity.

use super::ValidationError;
use serde::{Deserialize, Serialize};

/// Database-assigned department identifier.
pub type DepartmentId = i64;

/// Organizational unit that owns a set of sellers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    /// `None` until the department is inserted.
    pub id: Option<DepartmentId>,
    pub name: String,
}

impl Department {
    /// Creates an unsaved department.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a department that already has a storage identity.
    pub fn with_id(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Checks write-side invariants.
    ///
    /// # Errors
    /// - `ValidationError::BlankName` when the name is empty after trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName {
                entity: "department",
            });
        }
        Ok(())
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Department;
    use crate::model::ValidationError;

    #[test]
    fn new_department_is_unsaved() {
        let department = Department::new("Computers");
        assert_eq!(department.id, None);
        assert!(!department.is_persisted());
    }

    #[test]
    fn validate_rejects_whitespace_name() {
        let err = Department::with_id(3, "   ").validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::BlankName {
                entity: "department"
            }
        );
    }
}
