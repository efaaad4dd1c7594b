//! Bookings: creation, owner listing, status updates and deletion.

pub mod repository;
pub mod service;

pub use service::BookingService;
