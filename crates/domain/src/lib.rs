//! Domain layer for the share-metadata backend.
//!
//! This crate contains:
//! - Domain models (entity types, roles, settings documents, audit records,
//!   share events, resolved metadata)
//! - Pure business logic (layered metadata resolution, token substitution,
//!   analytics rollups)

pub mod models;
pub mod services;
