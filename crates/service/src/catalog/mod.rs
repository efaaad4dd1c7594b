//! Service catalog: listing, lookup and creation of `services` documents.

pub mod repository;
pub mod service;

pub use service::CatalogService;
