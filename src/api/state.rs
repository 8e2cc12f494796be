//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, CategoryService, ProductService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub category_service: Arc<dyn CategoryService>,
    pub product_service: Arc<dyn ProductService>,
    pub database: Arc<Database>,
    /// Mark auth cookies `Secure`
    pub secure_cookies: bool,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let secure_cookies = config.is_production();
        let container = Services::from_connection(database.get_connection(), config);

        Self::new(&container, database, secure_cookies)
    }

    /// Create application state from an already wired service container.
    pub fn new(
        services: &impl ServiceContainer,
        database: Arc<Database>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            category_service: services.categories(),
            product_service: services.products(),
            database,
            secure_cookies,
        }
    }
}
