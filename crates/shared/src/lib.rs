//! Shared utilities and common types for the share-metadata backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, anonymized IP digests)
//! - JWT token issuing and validation

pub mod crypto;
pub mod jwt;
