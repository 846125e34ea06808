//! Log message constants
//!
//! This module centralizes the log messages used throughout the crate
//! to keep wording consistent between the middleware and the binary.

/// Application startup and lifecycle messages
pub mod application {
    pub const STARTING: &str = "Starting convert-header service";
    pub const CONFIG_LOADED: &str = "Configuration loaded";
    pub const LISTENING: &str = "Listening for connections";
    pub const SHUTDOWN_REQUESTED: &str = "Shutdown signal received";
    pub const STOPPED: &str = "Service stopped";
}

/// Per-request conversion messages
pub mod conversion {
    pub const HEADER_REWRITTEN: &str = "Header rewritten";
    pub const CONVERSION_FAILED: &str = "Header conversion failed; request aborted";
}
