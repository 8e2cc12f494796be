//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion and reach repositories through a Unit of Work.

mod auth_service;
mod category_service;
pub mod container;
mod product_service;

pub use container::{ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenPair};
pub use category_service::{CategoryManager, CategoryService};
pub use product_service::{ProductManager, ProductService};
