//! Category domain entity and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::slug::slugify;
use crate::utils::validation::{optional_text, sluggable};

/// Visibility of a category in the storefront
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryStatus {
    #[default]
    Active,
    Inactive,
}

impl CategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryStatus::Active => "ACTIVE",
            CategoryStatus::Inactive => "INACTIVE",
        }
    }
}

impl From<&str> for CategoryStatus {
    fn from(s: &str) -> Self {
        match s {
            "INACTIVE" => CategoryStatus::Inactive,
            _ => CategoryStatus::Active,
        }
    }
}

impl std::fmt::Display for CategoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category domain entity with soft delete support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub trashed: bool,
    pub trashed_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(input: CategoryInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            description: input.description,
            status: input.status,
            created_at: now,
            updated_at: now,
            trashed: false,
            trashed_at: None,
        }
    }

    /// Replace every mutable field
    pub fn apply(&mut self, input: CategoryInput) {
        self.name = input.name;
        self.slug = input.slug;
        self.description = input.description;
        self.status = input.status;
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
pub struct CategoryPayload {
    #[validate(custom(function = "sluggable"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CategoryStatus>,
}

/// Normalized category fields with the derived slug
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: CategoryStatus,
}

impl From<CategoryPayload> for CategoryInput {
    fn from(payload: CategoryPayload) -> Self {
        let name = payload.name.trim().to_string();
        Self {
            slug: slugify(&name),
            name,
            description: optional_text(payload.description),
            status: payload.status.unwrap_or_default(),
        }
    }
}

impl CategoryInput {
    pub fn named(name: &str) -> Self {
        Self::from(CategoryPayload {
            name: name.to_string(),
            description: None,
            status: None,
        })
    }
}
