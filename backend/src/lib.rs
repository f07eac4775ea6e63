//! Shoe Catalog Backend Library
//!
//! Schema, records and credential handling for the catalog, plus the
//! repositories, services and routes that serve it over HTTP.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
