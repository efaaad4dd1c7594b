//! Service layer for the car doctor backend.
//! - Repositories hide the document store behind traits (MongoDB and in-memory).
//! - Services hold the per-endpoint rules: id parsing, status defaults, JSON rendering.
//! - `auth` issues and verifies bearer tokens.

pub mod errors;
pub mod auth;
pub mod catalog;
pub mod bookings;
pub mod unavailable;

pub use bookings::BookingService;
pub use catalog::CatalogService;
