//! Department use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::department::{Department, DepartmentId};
use crate::repo::department_repo::DepartmentRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for department maintenance.
pub struct DepartmentService<R: DepartmentRepository> {
    repo: R,
}

impl<R: DepartmentRepository> DepartmentService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Department>> {
        self.repo.find_all()
    }

    pub fn find_by_id(&self, id: DepartmentId) -> RepoResult<Option<Department>> {
        self.repo.find_by_id(id)
    }

    /// Inserts unsaved departments and updates persisted ones.
    ///
    /// Returns the id the department is stored under.
    pub fn save_or_update(&self, department: &mut Department) -> RepoResult<DepartmentId> {
        match department.id {
            None => self.repo.insert(department),
            Some(id) => {
                self.repo.update(department)?;
                Ok(id)
            }
        }
    }

    /// Deletes a persisted department.
    ///
    /// Fails with `RepoError::Integrity` while sellers still reference it.
    pub fn remove(&self, department: &Department) -> RepoResult<()> {
        let id = department.id.ok_or(RepoError::MissingId("department"))?;
        self.repo.delete_by_id(id)
    }
}
