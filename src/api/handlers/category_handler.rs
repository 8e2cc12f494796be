//! Category handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::extractors::{IdPath, ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Category, CategoryInput, CategoryPayload};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, Paginated, PaginationParams};

/// Create category routes (mounted behind the auth middleware)
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_category))
        .route("/paginated", get(list_categories))
        .route(
            "/:id",
            get(show_category)
                .put(update_category)
                .delete(delete_category),
        )
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CategoryPayload>,
) -> AppResult<Created<Category>> {
    tracing::debug!(by = %user.email, "Creating category");
    let category = state
        .category_service
        .create(CategoryInput::from(payload))
        .await?;

    Ok(Created(category))
}

pub async fn show_category(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Category>> {
    Ok(Json(state.category_service.show(id).await?))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<CategoryPayload>,
) -> AppResult<Json<Category>> {
    tracing::debug!(by = %user.email, category_id = %id, "Updating category");
    let category = state
        .category_service
        .update(id, CategoryInput::from(payload))
        .await?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    tracing::debug!(by = %user.email, category_id = %id, "Deleting category");
    state.category_service.delete(id).await?;

    Ok(Json(MessageResponse::new("Category deleted successfully")))
}

/// List active categories, ordered by name
pub async fn list_categories(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Category>>> {
    Ok(Json(state.category_service.list_paginated(params).await?))
}
