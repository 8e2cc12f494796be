//! Product database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::Product;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    /// Cents
    pub price: i64,
    pub stock: i64,
    pub sku: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub trashed: bool,
    pub trashed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            price: model.price,
            stock: model.stock,
            sku: model.sku,
            created_at: model.created_at,
            updated_at: model.updated_at,
            trashed: model.trashed,
            trashed_at: model.trashed_at,
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            slug: Set(product.slug),
            description: Set(product.description),
            price: Set(product.price),
            stock: Set(product.stock),
            sku: Set(product.sku),
            created_at: Set(product.created_at),
            updated_at: Set(product.updated_at),
            trashed: Set(product.trashed),
            trashed_at: Set(product.trashed_at),
        }
    }
}
