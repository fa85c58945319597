//! Domain logic for the script store.
//!
//! Everything here is transport-agnostic: request schemas and their pure
//! validation, the placeholder engine, the storage and job-submission
//! seams, and the [`ScriptStore`](scripts::store::ScriptStore) service that
//! ties them together.

pub mod error;
pub mod jobs;
pub mod scripts;
pub mod types;
