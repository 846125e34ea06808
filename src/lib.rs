//! Convert Header - an HTTP request header conversion middleware
//!
//! Reads one request header, rewrites substrings of its value, optionally
//! reinterprets it as a number and writes the result into a (possibly
//! different) header before the request is forwarded.

pub mod application;
pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::Application;
pub use convert::{ConvertHeader, ConvertHeaderStack};
pub use error::{Error, Result};
