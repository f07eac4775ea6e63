//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the auth primitives.

pub mod catalog;
pub mod user;

pub use catalog::CatalogService;
pub use user::UserService;
