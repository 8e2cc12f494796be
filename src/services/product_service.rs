//! Product use cases.
//!
//! Every operation only sees active (not trashed) products. Slugs must
//! be unique among active products; trashing one frees its slug.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    CAUSE_CREATE_PRODUCT_ERROR, CAUSE_DELETE_PRODUCT_ERROR, CAUSE_LIST_PRODUCT_PAGINATED_ERROR,
    CAUSE_PRODUCT_ALREADY_EXISTS, CAUSE_PRODUCT_NOT_FOUND, CAUSE_SHOW_PRODUCT_ERROR,
    CAUSE_UPDATE_PRODUCT_ERROR,
};
use crate::domain::{Product, ProductInput};
use crate::errors::{AppError, AppResult, ResultExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    async fn create(&self, input: ProductInput) -> AppResult<Product>;

    async fn show(&self, id: Uuid) -> AppResult<Product>;

    /// Replace every mutable field of an active product
    async fn update(&self, id: Uuid, input: ProductInput) -> AppResult<Product>;

    /// Soft delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list_paginated(&self, params: PaginationParams) -> AppResult<Paginated<Product>>;
}

fn not_found() -> AppError {
    AppError::not_found("Product not found", CAUSE_PRODUCT_NOT_FOUND)
}

fn already_exists() -> AppError {
    AppError::conflict("Product already exists", CAUSE_PRODUCT_ALREADY_EXISTS)
}

/// Concrete implementation of ProductService using Unit of Work.
pub struct ProductManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ProductManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find_active(&self, id: Uuid) -> AppResult<Product> {
        self.uow.products().find_by_id(id).await?.ok_or_else(not_found)
    }
}

#[async_trait]
impl<U: UnitOfWork> ProductService for ProductManager<U> {
    async fn create(&self, input: ProductInput) -> AppResult<Product> {
        async {
            let products = self.uow.products();
            if products.find_by_slug(&input.slug, None).await?.is_some() {
                return Err(already_exists());
            }

            let product = products.create(Product::new(input)).await?;
            tracing::info!(product_id = %product.id, slug = %product.slug, "Product created");
            Ok(product)
        }
        .await
        .or_internal(CAUSE_CREATE_PRODUCT_ERROR)
    }

    async fn show(&self, id: Uuid) -> AppResult<Product> {
        self.find_active(id)
            .await
            .or_internal(CAUSE_SHOW_PRODUCT_ERROR)
    }

    async fn update(&self, id: Uuid, input: ProductInput) -> AppResult<Product> {
        async {
            let mut product = self.find_active(id).await?;

            if product.slug != input.slug
                && self
                    .uow
                    .products()
                    .find_by_slug(&input.slug, Some(id))
                    .await?
                    .is_some()
            {
                return Err(already_exists());
            }

            product.apply(input);
            self.uow.products().save(product).await
        }
        .await
        .or_internal(CAUSE_UPDATE_PRODUCT_ERROR)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        async {
            let mut product = self.find_active(id).await?;
            product.trash();
            self.uow.products().save(product).await?;

            tracing::info!(product_id = %id, "Product trashed");
            Ok(())
        }
        .await
        .or_internal(CAUSE_DELETE_PRODUCT_ERROR)
    }

    async fn list_paginated(&self, params: PaginationParams) -> AppResult<Paginated<Product>> {
        let (data, total) = self
            .uow
            .products()
            .list_paginated(&params)
            .await
            .or_internal(CAUSE_LIST_PRODUCT_PAGINATED_ERROR)?;

        Ok(Paginated::new(data, &params, total))
    }
}
