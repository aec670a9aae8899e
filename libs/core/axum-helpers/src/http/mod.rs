//! HTTP middleware module.
//!
//! Currently provides security response headers; CORS is configured by
//! [`crate::server::create_router`] from the `CORS_ALLOWED_ORIGIN` variable.

pub mod security;

pub use security::security_headers;
