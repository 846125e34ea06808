//! Domain types shared across the crate
//!
//! Validated configuration values, following type-driven development
//! principles.

pub mod config_types;

pub use config_types::*;
