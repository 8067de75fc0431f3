//! Domain services: pure business logic with no I/O.

pub mod analytics;
pub mod resolution;
pub mod template;
