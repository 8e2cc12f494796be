//! Category use cases.
//!
//! Every operation only sees active (not trashed) categories. Slugs must
//! be unique among active categories; trashing one frees its slug.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{
    CAUSE_CATEGORY_IN_USE, CAUSE_CATEGORY_NOT_FOUND, CAUSE_CREATE_CATEGORY_ERROR,
    CAUSE_DELETE_CATEGORY_ERROR, CAUSE_LIST_CATEGORY_PAGINATED_ERROR, CAUSE_SHOW_CATEGORY_ERROR,
    CAUSE_UPDATE_CATEGORY_ERROR,
};
use crate::domain::{Category, CategoryInput};
use crate::errors::{AppError, AppResult, ResultExt};
use crate::infra::UnitOfWork;
use crate::types::{Paginated, PaginationParams};

/// Category service trait for dependency injection.
#[async_trait]
pub trait CategoryService: Send + Sync {
    async fn create(&self, input: CategoryInput) -> AppResult<Category>;

    async fn show(&self, id: Uuid) -> AppResult<Category>;

    /// Replace every mutable field of an active category
    async fn update(&self, id: Uuid, input: CategoryInput) -> AppResult<Category>;

    /// Soft delete
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list_paginated(&self, params: PaginationParams) -> AppResult<Paginated<Category>>;
}

fn not_found() -> AppError {
    AppError::not_found("Category not found", CAUSE_CATEGORY_NOT_FOUND)
}

fn in_use() -> AppError {
    AppError::conflict("Category already exists", CAUSE_CATEGORY_IN_USE)
}

/// Concrete implementation of CategoryService using Unit of Work.
pub struct CategoryManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CategoryManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find_active(&self, id: Uuid) -> AppResult<Category> {
        self.uow.categories().find_by_id(id).await?.ok_or_else(not_found)
    }
}

#[async_trait]
impl<U: UnitOfWork> CategoryService for CategoryManager<U> {
    async fn create(&self, input: CategoryInput) -> AppResult<Category> {
        async {
            let categories = self.uow.categories();
            if categories.find_by_slug(&input.slug, None).await?.is_some() {
                return Err(in_use());
            }

            let category = categories.create(Category::new(input)).await?;
            tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");
            Ok(category)
        }
        .await
        .or_internal(CAUSE_CREATE_CATEGORY_ERROR)
    }

    async fn show(&self, id: Uuid) -> AppResult<Category> {
        self.find_active(id)
            .await
            .or_internal(CAUSE_SHOW_CATEGORY_ERROR)
    }

    async fn update(&self, id: Uuid, input: CategoryInput) -> AppResult<Category> {
        async {
            let mut category = self.find_active(id).await?;

            if category.slug != input.slug
                && self
                    .uow
                    .categories()
                    .find_by_slug(&input.slug, Some(id))
                    .await?
                    .is_some()
            {
                return Err(in_use());
            }

            category.apply(input);
            self.uow.categories().save(category).await
        }
        .await
        .or_internal(CAUSE_UPDATE_CATEGORY_ERROR)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        async {
            let mut category = self.find_active(id).await?;
            category.trash();
            self.uow.categories().save(category).await?;

            tracing::info!(category_id = %id, "Category trashed");
            Ok(())
        }
        .await
        .or_internal(CAUSE_DELETE_CATEGORY_ERROR)
    }

    async fn list_paginated(&self, params: PaginationParams) -> AppResult<Paginated<Category>> {
        let (data, total) = self
            .uow
            .categories()
            .list_paginated(&params)
            .await
            .or_internal(CAUSE_LIST_CATEGORY_PAGINATED_ERROR)?;

        Ok(Paginated::new(data, &params, total))
    }
}
