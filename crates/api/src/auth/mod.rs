//! Authentication primitives.
//!
//! - [`jwt`] -- bearer-token verification and minting.

pub mod jwt;
