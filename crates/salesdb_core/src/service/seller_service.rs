//! Seller use-case service.

use crate::model::department::Department;
use crate::model::seller::{Seller, SellerId};
use crate::repo::seller_repo::SellerRepository;
use crate::repo::{RepoError, RepoResult};

/// Use-case service wrapper for seller maintenance.
pub struct SellerService<R: SellerRepository> {
    repo: R,
}

impl<R: SellerRepository> SellerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn find_all(&self) -> RepoResult<Vec<Seller>> {
        self.repo.find_all()
    }

    pub fn find_by_id(&self, id: SellerId) -> RepoResult<Option<Seller>> {
        self.repo.find_by_id(id)
    }

    pub fn find_by_department(&self, department: &Department) -> RepoResult<Vec<Seller>> {
        self.repo.find_by_department(department)
    }

    /// Inserts unsaved sellers and updates persisted ones.
    pub fn save_or_update(&self, seller: &mut Seller) -> RepoResult<SellerId> {
        match seller.id {
            None => self.repo.insert(seller),
            Some(id) => {
                self.repo.update(seller)?;
                Ok(id)
            }
        }
    }

    pub fn remove(&self, seller: &Seller) -> RepoResult<()> {
        let id = seller.id.ok_or(RepoError::MissingId("seller"))?;
        self.repo.delete_by_id(id)
    }
}
