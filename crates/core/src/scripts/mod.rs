//! Versioned, user-owned scripts.
//!
//! - [`model`] -- the `Script` entity and the create-request schema.
//! - [`version`] -- version syntax rules and server-side version assignment.
//! - [`delete`] -- the mutually exclusive delete target.
//! - [`placeholder`] -- `${name}` extraction and strict substitution.
//! - [`repository`] -- the storage seam, implemented in memory here and
//!   over PostgreSQL in the `db` crate.
//! - [`store`] -- the [`ScriptStore`](store::ScriptStore) service.

pub mod delete;
pub mod memory;
pub mod model;
pub mod placeholder;
pub mod repository;
pub mod store;
pub mod version;

pub use delete::{DeleteSummary, DeleteTarget};
pub use memory::InMemoryScriptRepository;
pub use model::{CreateScript, NewScript, Script};
pub use repository::ScriptRepository;
pub use store::ScriptStore;
