//! Row types for the `scripts` and `script_jobs` tables.
//!
//! Rows convert into the domain types in `scriptstore_core`, which carry
//! no sqlx dependency.

pub mod job;
pub mod script;
