//! Outbound adapters implementing the letter store port.
//!
//! - **persistence**: PostgreSQL/PostGIS via Diesel.
//! - **memory**: process-local store used when no database is configured
//!   and as a real-semantics test double.

pub mod memory;
pub mod persistence;
