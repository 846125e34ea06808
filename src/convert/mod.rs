//! Header conversion module
//!
//! Reads one request header, rewrites it and writes the result into a
//! (possibly different) header before the request moves on:
//! - `types`: raw and validated configuration, errors
//! - `transform`: the pure value transformation
//! - `middleware`: request plumbing around the transformation

pub mod echo;
pub mod error_response;
pub mod middleware;
pub mod middleware_stack;
pub mod middleware_test_helpers;
pub mod transform;
pub mod types;


pub use middleware::{convert_header_middleware, ConvertHeader};
pub use middleware_stack::ConvertHeaderStack;
pub use transform::transform;
pub use types::{
    ConfigError, ConversionError, ConversionKind, ConvertConfig, MiddlewareName,
    RawConvertConfig, ReplaceValue,
};
