//! Serialization views for catalog records
//!
//! These are the read-only projections handed to API clients. They carry
//! a subset of the stored columns: an item view never exposes its category
//! reference.

use serde::{Deserialize, Serialize};

/// Public projection of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
}

/// Public projection of a catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
}
