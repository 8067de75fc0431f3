//! Persistence layer for the share-metadata backend.
//!
//! This crate contains:
//! - The [`store::MetaStore`] trait, the single seam between handlers and
//!   the data store
//! - A PostgreSQL backend (production) and an in-memory backend (tests,
//!   local runs)
//! - Database connection management

pub mod db;
pub mod memory;
pub mod metrics;
pub mod postgres;
pub mod store;

pub use memory::MemoryMetaStore;
pub use postgres::PgMetaStore;
pub use store::{MetaStore, StoreError};
