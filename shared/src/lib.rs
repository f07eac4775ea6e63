//! Shoe Catalog Shared Library
//!
//! This crate contains the serialization views, request/response types,
//! error enums and validation helpers shared by the backend and its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{CategoryView, ItemView};
pub use types::*;
