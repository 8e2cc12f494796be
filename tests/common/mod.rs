//! In-memory repositories shared by the integration tests.
//!
//! They mirror the SeaORM stores closely enough for the services to run
//! end to end: trashed rows are invisible, slugs are unique among active
//! rows and listings are ordered by name.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use backoffice_api::api::create_router;
use backoffice_api::domain::{Category, Product, User};
use backoffice_api::errors::AppResult;
use backoffice_api::infra::{
    CategoryRepository, Database, Persistence, ProductRepository, UserRepository,
};
use backoffice_api::services::Services;
use backoffice_api::types::PaginationParams;
use backoffice_api::{AppState, Config};

pub const SECRET: &str = "integration-secret-key-at-least-32-chars";

pub fn config() -> Config {
    Config::new("postgres://localhost/backoffice_test", SECRET).unwrap()
}

// =============================================================================
// Users
// =============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

// =============================================================================
// Catalogue tables
// =============================================================================

/// Row shape the in-memory table needs to answer repository queries
pub trait Row: Clone + Send + Sync {
    fn id(&self) -> Uuid;
    fn slug(&self) -> &str;
    fn name(&self) -> &str;
    fn trashed(&self) -> bool;
    fn matches(&self, term: &str) -> bool;
}

fn contains(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|f| f.to_lowercase().contains(term))
}

impl Row for Category {
    fn id(&self) -> Uuid {
        self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn trashed(&self) -> bool {
        self.trashed
    }
    fn matches(&self, term: &str) -> bool {
        contains(Some(&self.name), term) || contains(self.description.as_deref(), term)
    }
}

impl Row for Product {
    fn id(&self) -> Uuid {
        self.id
    }
    fn slug(&self) -> &str {
        &self.slug
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn trashed(&self) -> bool {
        self.trashed
    }
    fn matches(&self, term: &str) -> bool {
        contains(Some(&self.name), term)
            || contains(self.description.as_deref(), term)
            || contains(Some(&self.sku), term)
    }
}

pub struct Table<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Row> Table<T> {
    /// Every stored row, trashed ones included
    pub fn all(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }

    fn get(&self, id: Uuid) -> Option<T> {
        let rows = self.rows.lock().unwrap();
        rows.iter().find(|r| r.id() == id && !r.trashed()).cloned()
    }

    fn get_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> Option<T> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|r| r.slug() == slug && !r.trashed() && Some(r.id()) != exclude)
            .cloned()
    }

    fn insert(&self, row: T) -> T {
        self.rows.lock().unwrap().push(row.clone());
        row
    }

    fn replace(&self, row: T) -> T {
        let mut rows = self.rows.lock().unwrap();
        if let Some(slot) = rows.iter_mut().find(|r| r.id() == row.id()) {
            *slot = row.clone();
        }
        row
    }

    fn page(&self, params: &PaginationParams) -> (Vec<T>, u64) {
        let term = params.search_term().map(str::to_lowercase);
        let mut active: Vec<T> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !r.trashed())
            .filter(|r| term.as_deref().map_or(true, |t| r.matches(t)))
            .cloned()
            .collect();
        active.sort_by(|a, b| a.name().cmp(b.name()));

        let total = active.len() as u64;
        let data = active
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect();
        (data, total)
    }
}

#[async_trait]
impl CategoryRepository for Table<Category> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<Option<Category>> {
        Ok(self.get_by_slug(slug, exclude))
    }

    async fn create(&self, category: Category) -> AppResult<Category> {
        Ok(self.insert(category))
    }

    async fn save(&self, category: Category) -> AppResult<Category> {
        Ok(self.replace(category))
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Category>, u64)> {
        Ok(self.page(params))
    }
}

#[async_trait]
impl ProductRepository for Table<Product> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.get(id))
    }

    async fn find_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<Option<Product>> {
        Ok(self.get_by_slug(slug, exclude))
    }

    async fn create(&self, product: Product) -> AppResult<Product> {
        Ok(self.insert(product))
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        Ok(self.replace(product))
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)> {
        Ok(self.page(params))
    }
}

// =============================================================================
// Wiring
// =============================================================================

/// In-memory persistence plus handles to inspect its tables
pub struct Fixture {
    pub uow: Arc<Persistence>,
    pub categories: Arc<Table<Category>>,
    pub products: Arc<Table<Product>>,
}

impl Fixture {
    pub fn new() -> Self {
        let categories = Arc::new(Table::<Category>::default());
        let products = Arc::new(Table::<Product>::default());
        let uow = Persistence::from_repositories(
            Arc::new(InMemoryUsers::default()),
            categories.clone(),
            products.clone(),
        );

        Self {
            uow: Arc::new(uow),
            categories,
            products,
        }
    }

    pub fn services(&self) -> Services {
        Services::from_unit_of_work(self.uow.clone(), config())
    }

    /// Full router over in-memory persistence and a disconnected database
    pub fn router(&self) -> Router {
        let database = Database::from_connection(DatabaseConnection::default());
        let state = AppState::new(&self.services(), Arc::new(database), false);
        create_router(state, &["http://localhost:5173".to_string()])
    }
}
