//! Domain model for sellers and the departments they belong to.
//!
//! # Responsibility
//! - Define the entity shapes hydrated by repositories.
//! - Own write-side validation rules shared by every persistence backend.
//!
//! # Invariants
//! - An entity with `id == None` has never been persisted.
//! - A seller always references exactly one department.

pub mod department;
pub mod seller;

/// Validation failures raised before any write reaches storage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity} name must not be blank")]
    BlankName { entity: &'static str },
    #[error("invalid seller email `{0}`")]
    InvalidEmail(String),
    #[error("base salary must be a finite, non-negative amount, got {0}")]
    InvalidBaseSalary(f64),
    #[error("seller department has not been persisted yet")]
    UnsavedDepartment,
}
