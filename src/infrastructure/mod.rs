//! Infrastructure layer
//!
//! Logging setup and the log message catalogue.

pub mod log_messages;
pub mod logging;

pub use logging::init_tracing;
