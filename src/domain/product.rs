//! Product domain entity and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::slug::slugify;
use crate::utils::validation::{not_blank, optional_text, sluggable};

/// Product domain entity with soft delete support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    pub stock: i64,
    pub sku: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub trashed: bool,
    pub trashed_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            description: input.description,
            price: input.price,
            stock: input.stock,
            sku: input.sku,
            created_at: now,
            updated_at: now,
            trashed: false,
            trashed_at: None,
        }
    }

    /// Replace every mutable field
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.slug = input.slug;
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock;
        self.sku = input.sku;
        self.updated_at = Utc::now();
    }

    pub fn trash(&mut self) {
        let now = Utc::now();
        self.trashed = true;
        self.trashed_at = Some(now);
        self.updated_at = now;
    }
}

/// Create/update request body. A client-sent `slug` is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductPayload {
    #[validate(custom(function = "sluggable"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Price must be a positive integer"))]
    pub price: i64,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: i64,
    #[validate(custom(function = "not_blank", message = "SKU is required"))]
    pub sku: String,
}

/// Normalized product fields with the derived slug
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i64,
    pub sku: String,
}

impl From<ProductPayload> for ProductInput {
    fn from(payload: ProductPayload) -> Self {
        let name = payload.name.trim().to_string();
        Self {
            slug: slugify(&name),
            name,
            description: optional_text(payload.description),
            price: payload.price,
            stock: payload.stock,
            sku: payload.sku.trim().to_string(),
        }
    }
}
