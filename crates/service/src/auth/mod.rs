//! Bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying whatever identity object the caller posted
//! (usually `{ "email": ... }`) plus `iat`/`exp`.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::TokenService;
