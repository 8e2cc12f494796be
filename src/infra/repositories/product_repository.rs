//! Product repository implementation with soft delete support.
//!
//! Every query only sees rows where `trashed = false`.

use async_trait::async_trait;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use super::base::{contains_pattern, unique_conflict};
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::config::CAUSE_PRODUCT_ALREADY_EXISTS;
use crate::domain::Product;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find active product by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Find the active product holding `slug`, ignoring `exclude`
    async fn find_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<Option<Product>>;

    /// Persist a new product
    async fn create(&self, product: Product) -> AppResult<Product>;

    /// Overwrite every column of an existing product
    async fn save(&self, product: Product) -> AppResult<Product>;

    /// One page of active products ordered by name, plus the total count
    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn already_exists(err: sea_orm::DbErr) -> AppError {
    unique_conflict(err, "Product already exists", CAUSE_PRODUCT_ALREADY_EXISTS)
}

/// Active rows matching the optional search, ordered by name
fn active_listing(params: &PaginationParams) -> Select<ProductEntity> {
    let mut query = ProductEntity::find().filter(product::Column::Trashed.eq(false));

    if let Some(term) = params.search_term() {
        let pattern = contains_pattern(term);
        query = query.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((ProductEntity, product::Column::Name))))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        ProductEntity,
                        product::Column::Description,
                    ))))
                    .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((ProductEntity, product::Column::Sku))))
                        .like(pattern),
                ),
        );
    }

    query.order_by_asc(product::Column::Name)
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .filter(product::Column::Trashed.eq(false))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<Option<Product>> {
        let mut query = ProductEntity::find()
            .filter(product::Column::Slug.eq(slug))
            .filter(product::Column::Trashed.eq(false));

        if let Some(id) = exclude {
            query = query.filter(product::Column::Id.ne(id));
        }

        let result = query.one(&self.db).await.map_err(AppError::from)?;
        Ok(result.map(Product::from))
    }

    async fn create(&self, product: Product) -> AppResult<Product> {
        let model = ActiveModel::from(product)
            .insert(&self.db)
            .await
            .map_err(already_exists)?;

        Ok(Product::from(model))
    }

    async fn save(&self, product: Product) -> AppResult<Product> {
        let model = ActiveModel::from(product)
            .update(&self.db)
            .await
            .map_err(already_exists)?;

        Ok(Product::from(model))
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Product>, u64)> {
        let query = active_listing(params);
        let page = query
            .clone()
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db);

        let (models, total) = tokio::try_join!(page, query.count(&self.db))?;

        Ok((models.into_iter().map(Product::from).collect(), total))
    }
}
