//! sqlx-backed implementations of the core storage traits.

pub mod job_repo;
pub mod script_repo;

pub use job_repo::PgJobQueue;
pub use script_repo::PgScriptRepository;
