//! Unit of Work: one access point to every repository.
//!
//! Services hold a `UnitOfWork` rather than individual repositories, so
//! tests can swap the whole persistence layer at once.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::repositories::{
    CategoryRepository, CategoryStore, ProductRepository, ProductStore, UserRepository, UserStore,
};

/// Unit of Work trait for dependency injection.
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn categories(&self) -> Arc<dyn CategoryRepository>;

    fn products(&self) -> Arc<dyn ProductRepository>;
}

/// Concrete implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    user_repo: Arc<dyn UserRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    product_repo: Arc<dyn ProductRepository>,
}

impl Persistence {
    /// SeaORM-backed repositories sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self::from_repositories(
            Arc::new(UserStore::new(db.clone())),
            Arc::new(CategoryStore::new(db.clone())),
            Arc::new(ProductStore::new(db)),
        )
    }

    /// Assemble from arbitrary repository implementations (mocks, fakes)
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            user_repo: users,
            category_repo: categories,
            product_repo: products,
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryRepository> {
        self.category_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }
}
