//! HTTP responses for conversion failures
//!
//! A failed conversion terminates the request with a bare status code.
//! The diagnostic goes to the log, never into the response body.

use crate::convert::types::ConversionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Extension trait mapping errors onto HTTP status codes
pub trait ErrorResponseExt {
    /// Get the appropriate HTTP status code
    fn status_code(&self) -> StatusCode;
}

impl ErrorResponseExt for ConversionError {
    fn status_code(&self) -> StatusCode {
        use ConversionError::*;

        match self {
            ParseFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        self.status_code().into_response()
    }
}
