//! Category repository implementation with soft delete support.
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
use super::entities::category::{self, ActiveModel, Entity as CategoryEntity};
use crate::config::CAUSE_CATEGORY_IN_USE;
use crate::domain::Category;
use crate::errors::{AppError, AppResult};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Category repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find active category by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>>;

    /// Find the active category holding `slug`, ignoring `exclude`
    async fn find_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<Option<Category>>;

    /// Persist a new category
    async fn create(&self, category: Category) -> AppResult<Category>;

    /// Overwrite every column of an existing category
    async fn save(&self, category: Category) -> AppResult<Category>;

    /// One page of active categories ordered by name, plus the total count
    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Category>, u64)>;
}

/// Concrete implementation of CategoryRepository
pub struct CategoryStore {
    db: DatabaseConnection,
}

impl CategoryStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn in_use(err: sea_orm::DbErr) -> AppError {
    unique_conflict(err, "Category already exists", CAUSE_CATEGORY_IN_USE)
}

/// Active rows matching the optional search, ordered by name
fn active_listing(params: &PaginationParams) -> Select<CategoryEntity> {
    let mut query = CategoryEntity::find().filter(category::Column::Trashed.eq(false));

    if let Some(term) = params.search_term() {
        let pattern = contains_pattern(term);
        query = query.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((CategoryEntity, category::Column::Name))))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        CategoryEntity,
                        category::Column::Description,
                    ))))
                    .like(pattern),
                ),
        );
    }

    query.order_by_asc(category::Column::Name)
}

#[async_trait]
impl CategoryRepository for CategoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        let result = CategoryEntity::find_by_id(id)
            .filter(category::Column::Trashed.eq(false))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Category::from))
    }

    async fn find_by_slug(&self, slug: &str, exclude: Option<Uuid>) -> AppResult<Option<Category>> {
        let mut query = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .filter(category::Column::Trashed.eq(false));

        if let Some(id) = exclude {
            query = query.filter(category::Column::Id.ne(id));
        }

        let result = query.one(&self.db).await.map_err(AppError::from)?;
        Ok(result.map(Category::from))
    }

    async fn create(&self, category: Category) -> AppResult<Category> {
        let model = ActiveModel::from(category)
            .insert(&self.db)
            .await
            .map_err(in_use)?;

        Ok(Category::from(model))
    }

    async fn save(&self, category: Category) -> AppResult<Category> {
        let model = ActiveModel::from(category)
            .update(&self.db)
            .await
            .map_err(in_use)?;

        Ok(Category::from(model))
    }

    async fn list_paginated(&self, params: &PaginationParams) -> AppResult<(Vec<Category>, u64)> {
        let query = active_listing(params);
        let page = query
            .clone()
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db);

        let (models, total) = tokio::try_join!(page, query.count(&self.db))?;

        Ok((models.into_iter().map(Category::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait, Value};

    fn string(value: &str) -> Value {
        Value::String(Some(Box::new(value.to_string())))
    }

    #[test]
    fn test_listing_hides_trashed_and_orders_by_name() {
        let stmt = active_listing(&PaginationParams::default()).build(DbBackend::Postgres);

        assert!(stmt.sql.contains(r#"WHERE "categories"."trashed" = $1"#));
        assert!(stmt.sql.ends_with(r#"ORDER BY "categories"."name" ASC"#));
        assert!(!stmt.sql.contains("LIKE"));
        assert_eq!(stmt.values.unwrap().0, vec![Value::Bool(Some(false))]);
    }

    #[test]
    fn test_search_is_lowercased_and_escaped() {
        let params = PaginationParams::default().with_search(" 50%_OFF ");
        let stmt = active_listing(&params).build(DbBackend::Postgres);

        assert!(stmt.sql.contains(r#"LOWER("categories"."name") LIKE $"#));
        assert!(stmt.sql.contains(r#"LOWER("categories"."description") LIKE $"#));
        assert!(stmt.sql.contains(" OR "));

        let values = stmt.values.unwrap().0;
        assert_eq!(values[0], Value::Bool(Some(false)));
        assert_eq!(values.len(), 3);
        assert!(values[1..].iter().all(|v| *v == string(r"%50\%\_off%")));
    }
}
