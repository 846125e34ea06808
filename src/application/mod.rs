//! Application services
//!
//! Wires the settings, the conversion middleware and the HTTP server.

pub mod app;

pub use app::Application;
