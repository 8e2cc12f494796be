//! Domain layer - Core business entities and logic
//!
//! Entities, value objects and request payloads, independent of
//! persistence and HTTP concerns.

pub mod category;
pub mod password;
pub mod product;
pub mod slug;
pub mod user;

pub use category::{Category, CategoryInput, CategoryPayload, CategoryStatus};
pub use password::Password;
pub use product::{Product, ProductInput, ProductPayload};
pub use user::{SignIn, SignUp, User};
