//! PostgreSQL persistence for letters.
//!
//! Diesel with `diesel-async` and a `bb8` pool. Row structs and SQL stay in
//! this module; only domain types cross the [`LetterStore`] boundary.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselLetterStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/letters")).await?;
//! let store = DieselLetterStore::new(pool);
//! ```
//!
//! [`LetterStore`]: crate::domain::ports::LetterStore

mod diesel_error_mapping;
mod diesel_letter_store;
mod migrations;
mod models;
mod pool;

pub use diesel_letter_store::DieselLetterStore;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
