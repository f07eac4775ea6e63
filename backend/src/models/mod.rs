//! Catalog records
//!
//! One struct per mapped table (see [`crate::db::schema`]), each decoding
//! straight from a row.

mod category;
mod item;
mod user;

pub use category::Category;
pub use item::Item;
pub use user::User;
