//! Client for the storefront's commerce API.

pub mod client;
pub mod error;
pub mod memo;
mod retry;

pub use client::{CatalogClient, CatalogSettings};
pub use error::CatalogError;
pub use memo::MemoizedCatalog;
