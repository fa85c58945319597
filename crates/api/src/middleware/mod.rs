//! Request extractors that run before handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the caller's identity from a JWT Bearer token.

pub mod auth;
