//! Middleware stack builder for clean composition
//!
//! Applies the header conversion (and optionally request tracing) to any
//! axum `Router`.

use crate::convert::middleware::{convert_header_middleware, ConvertHeader};
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builder for composing the conversion middleware stack
pub struct ConvertHeaderStack {
    convert: Arc<ConvertHeader>,
    trace_requests: bool,
}

impl ConvertHeaderStack {
    /// Create a new stack with request tracing enabled
    pub fn new(convert: ConvertHeader) -> Self {
        Self {
            convert: Arc::new(convert),
            trace_requests: true,
        }
    }

    /// Skip the `TraceLayer`
    pub fn without_tracing(mut self) -> Self {
        self.trace_requests = false;
        self
    }

    /// Apply the stack to a router
    ///
    /// Layers, outer to inner:
    /// 1. Request tracing (when enabled)
    /// 2. Header conversion
    pub fn apply_to_router<S>(self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let router = router.layer(from_fn_with_state(self.convert, convert_header_middleware));

        if self.trace_requests {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        }
    }
}
