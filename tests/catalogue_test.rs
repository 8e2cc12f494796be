//! Catalogue service tests over in-memory persistence.
//!
//! Exercise the category and product use cases end to end through the
//! service container, without a database.

mod common;

use backoffice_api::domain::{CategoryInput, CategoryStatus, ProductInput, ProductPayload};
use backoffice_api::errors::AppError;
use backoffice_api::services::ServiceContainer;
use backoffice_api::types::PaginationParams;
use uuid::Uuid;

use common::Fixture;

fn product(name: &str, sku: &str) -> ProductInput {
    ProductInput::from(ProductPayload {
        name: name.to_string(),
        description: None,
        price: 1990,
        stock: 10,
        sku: sku.to_string(),
    })
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_slug_derived_from_name() {
    let fixture = Fixture::new();
    let categories = fixture.services().categories();

    let category = categories
        .create(CategoryInput::named("  Ração Seca "))
        .await
        .unwrap();

    assert_eq!(category.name, "Ração Seca");
    assert_eq!(category.slug, "racao-seca");
    assert_eq!(category.status, CategoryStatus::Active);
    assert!(!category.trashed);
}

#[tokio::test]
async fn test_duplicate_slug_conflicts_until_trashed() {
    let fixture = Fixture::new();
    let categories = fixture.services().categories();

    let first = categories.create(CategoryInput::named("Toys")).await.unwrap();

    let err = categories
        .create(CategoryInput::named("TOYS"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict { cause: "CATEGORY_IN_USE", .. }));

    categories.delete(first.id).await.unwrap();
    let second = categories.create(CategoryInput::named("TOYS")).await.unwrap();

    assert_eq!(second.slug, "toys");
    assert_ne!(second.id, first.id);

    // The trashed row is kept, not removed
    let stored = fixture.categories.all();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().any(|c| c.id == first.id && c.trashed && c.trashed_at.is_some()));
}

#[tokio::test]
async fn test_trashed_category_is_invisible() {
    let fixture = Fixture::new();
    let categories = fixture.services().categories();

    let category = categories.create(CategoryInput::named("Toys")).await.unwrap();
    categories.delete(category.id).await.unwrap();

    let show = categories.show(category.id).await.unwrap_err();
    let update = categories
        .update(category.id, CategoryInput::named("Games"))
        .await
        .unwrap_err();
    let delete = categories.delete(category.id).await.unwrap_err();

    for err in [show, update, delete] {
        assert_eq!(err.cause(), "CATEGORY_NOT_FOUND");
        assert_eq!(err.status().as_u16(), 404);
    }

    let page = categories
        .list_paginated(PaginationParams::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_rename_checks_other_categories_only() {
    let fixture = Fixture::new();
    let categories = fixture.services().categories();

    let toys = categories.create(CategoryInput::named("Toys")).await.unwrap();
    categories.create(CategoryInput::named("Games")).await.unwrap();

    // Keeping its own slug is fine
    let same = categories
        .update(
            toys.id,
            CategoryInput {
                description: Some("For kids".into()),
                status: CategoryStatus::Inactive,
                ..CategoryInput::named("toys")
            },
        )
        .await
        .unwrap();
    assert_eq!(same.slug, "toys");
    assert_eq!(same.status, CategoryStatus::Inactive);

    let renamed = categories
        .update(toys.id, CategoryInput::named("Board Games"))
        .await
        .unwrap();
    assert_eq!(renamed.slug, "board-games");
    assert_eq!(renamed.id, toys.id);

    let err = categories
        .update(toys.id, CategoryInput::named("Games"))
        .await
        .unwrap_err();
    assert_eq!(err.cause(), "CATEGORY_IN_USE");
    assert_eq!(err.status().as_u16(), 409);
}

#[tokio::test]
async fn test_unknown_category_is_not_found() {
    let fixture = Fixture::new();
    let err = fixture
        .services()
        .categories()
        .show(Uuid::new_v4())
        .await
        .unwrap_err();

    assert_eq!(err.cause(), "CATEGORY_NOT_FOUND");
}

#[tokio::test]
async fn test_category_search_is_case_insensitive() {
    let fixture = Fixture::new();
    let categories = fixture.services().categories();

    categories.create(CategoryInput::named("Dog Food")).await.unwrap();
    categories.create(CategoryInput::named("Cat Toys")).await.unwrap();
    categories
        .create(CategoryInput {
            description: Some("Treats for dogs".into()),
            ..CategoryInput::named("Snacks")
        })
        .await
        .unwrap();

    let page = categories
        .list_paginated(PaginationParams::default().with_search("  DOG "))
        .await
        .unwrap();

    let names: Vec<_> = page.data.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Dog Food", "Snacks"]);
    assert_eq!(page.meta.total, 2);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_product_pages_of_fifty() {
    let fixture = Fixture::new();
    let products = fixture.services().products();

    for i in 1..=120 {
        products
            .create(product(&format!("Product {:03}", i), &format!("SKU-{}", i)))
            .await
            .unwrap();
    }

    let first = products
        .list_paginated(PaginationParams::new(1, 50))
        .await
        .unwrap();
    assert_eq!(first.data.len(), 50);
    assert_eq!(first.data[0].slug, "product-001");
    assert_eq!(first.meta.total, 120);
    assert_eq!(first.meta.last_page, 3);
    assert_eq!(first.meta.first_page, 1);

    let last = products
        .list_paginated(PaginationParams::new(3, 50))
        .await
        .unwrap();
    assert_eq!(last.data.len(), 20);
    assert_eq!(last.data[0].slug, "product-101");

    let beyond = products
        .list_paginated(PaginationParams::new(4, 50))
        .await
        .unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.meta.current_page, 4);
    assert_eq!(beyond.meta.last_page, 3);

    let far_out = products
        .list_paginated(PaginationParams::new(368_934_881_474_191_035, 50))
        .await
        .unwrap();
    assert!(far_out.data.is_empty());
    assert_eq!(far_out.meta.total, 120);
}

#[tokio::test]
async fn test_product_slug_conflict_and_reuse() {
    let fixture = Fixture::new();
    let products = fixture.services().products();

    let kibble = products
        .create(product("Ração Premium", "RP-1"))
        .await
        .unwrap();
    assert_eq!(kibble.slug, "racao-premium");

    let err = products
        .create(product("ração premium", "RP-2"))
        .await
        .unwrap_err();
    assert_eq!(err.cause(), "PRODUCT_ALREADY_EXISTS");

    products.delete(kibble.id).await.unwrap();
    products
        .create(product("ração premium", "RP-2"))
        .await
        .unwrap();

    assert_eq!(fixture.products.all().len(), 2);
}

#[tokio::test]
async fn test_product_update_replaces_fields() {
    let fixture = Fixture::new();
    let products = fixture.services().products();

    let created = products.create(product("Leash", "L-1")).await.unwrap();
    let updated = products
        .update(
            created.id,
            ProductInput {
                price: 2500,
                stock: 0,
                description: Some("Nylon".into()),
                ..product("Long Leash", "L-2")
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.slug, "long-leash");
    assert_eq!(updated.price, 2500);
    assert_eq!(updated.stock, 0);
    assert_eq!(updated.sku, "L-2");
    assert_eq!(products.show(created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn test_product_search_matches_sku() {
    let fixture = Fixture::new();
    let products = fixture.services().products();

    products.create(product("Collar", "ACC-100")).await.unwrap();
    products.create(product("Bowl", "KIT-200")).await.unwrap();

    let page = products
        .list_paginated(PaginationParams::default().with_search("acc"))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].name, "Collar");
}

#[tokio::test]
async fn test_trashed_product_is_not_found() {
    let fixture = Fixture::new();
    let products = fixture.services().products();

    let created = products.create(product("Leash", "L-1")).await.unwrap();
    products.delete(created.id).await.unwrap();

    let err = products.show(created.id).await.unwrap_err();
    assert_eq!(err.cause(), "PRODUCT_NOT_FOUND");
    let err = products.delete(created.id).await.unwrap_err();
    assert_eq!(err.cause(), "PRODUCT_NOT_FOUND");
}
