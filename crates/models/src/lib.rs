//! Document models for the `services` and `bookings` collections plus the
//! MongoDB connection bootstrap.
//!
//! Documents stay schema-less (`bson::Document`); the modules here only know
//! the handful of fields the HTTP surface touches.

pub mod errors;
pub mod db;
pub mod document;
pub mod catalog;
pub mod booking;
pub mod results;

pub use mongodb::bson;
