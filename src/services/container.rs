//! Service Container - Centralized service access.
//!
//! Builds every service over one shared Unit of Work and hands them out
//! as trait objects.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, CategoryManager, CategoryService, ProductManager, ProductService,
};
use crate::config::Config;
use crate::infra::{Persistence, UnitOfWork};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn categories(&self) -> Arc<dyn CategoryService>;

    fn products(&self) -> Arc<dyn ProductService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    category_service: Arc<dyn CategoryService>,
    product_service: Arc<dyn ProductService>,
}

impl Services {
    /// Create a new service container with manually injected services
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        category_service: Arc<dyn CategoryService>,
        product_service: Arc<dyn ProductService>,
    ) -> Self {
        Self {
            auth_service,
            category_service,
            product_service,
        }
    }

    /// Wire every service over the given Unit of Work
    pub fn from_unit_of_work<U: UnitOfWork + 'static>(uow: Arc<U>, config: Config) -> Self {
        Self::new(
            Arc::new(Authenticator::new(uow.clone(), config)),
            Arc::new(CategoryManager::new(uow.clone())),
            Arc::new(ProductManager::new(uow)),
        )
    }

    /// Create service container from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_unit_of_work(Arc::new(Persistence::new(db)), config)
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn categories(&self) -> Arc<dyn CategoryService> {
        self.category_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }
}
