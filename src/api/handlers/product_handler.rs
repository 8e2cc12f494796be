//! Product handlers.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::extractors::{IdPath, ValidatedJson, ValidatedQuery};
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Product, ProductInput, ProductPayload};
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse, Paginated, PaginationParams};

/// Create product routes (mounted behind the auth middleware)
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/paginated", get(list_products))
        .route(
            "/:id",
            get(show_product)
                .put(update_product)
                .delete(delete_product),
        )
}

pub async fn create_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ProductPayload>,
) -> AppResult<Created<Product>> {
    tracing::debug!(by = %user.email, "Creating product");
    let product = state
        .product_service
        .create(ProductInput::from(payload))
        .await?;

    Ok(Created(product))
}

pub async fn show_product(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Product>> {
    Ok(Json(state.product_service.show(id).await?))
}

pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<ProductPayload>,
) -> AppResult<Json<Product>> {
    tracing::debug!(by = %user.email, product_id = %id, "Updating product");
    let product = state
        .product_service
        .update(id, ProductInput::from(payload))
        .await?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    tracing::debug!(by = %user.email, product_id = %id, "Deleting product");
    state.product_service.delete(id).await?;

    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

/// List active products, ordered by name
pub async fn list_products(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<Paginated<Product>>> {
    Ok(Json(state.product_service.list_paginated(params).await?))
}
