//! Header conversion middleware
//!
//! `ConvertHeader` owns a validated configuration and rewrites one request
//! header in place. `convert_header_middleware` plugs it into an axum stack
//! through `axum::middleware::from_fn_with_state`.

use crate::convert::transform::transform;
use crate::convert::types::*;
use crate::infrastructure::log_messages::conversion;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, error};

/// A named, ready-to-run header conversion
#[derive(Clone, Debug)]
pub struct ConvertHeader {
    name: MiddlewareName,
    config: ConvertConfig,
}

impl ConvertHeader {
    /// Validate a raw configuration and build the middleware
    pub fn new(name: MiddlewareName, raw: RawConvertConfig) -> Result<Self, ConfigError> {
        let config = ConvertConfig::try_from(raw)?;
        Ok(Self::from_config(name, config))
    }

    pub fn from_config(name: MiddlewareName, config: ConvertConfig) -> Self {
        Self { name, config }
    }

    pub fn name(&self) -> &MiddlewareName {
        &self.name
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Rewrites the target header of `headers`
    ///
    /// Any existing target header is removed before the conversion runs, so
    /// on failure the target header is left absent. The source bytes are
    /// used as received.
    pub fn apply(&self, headers: &mut HeaderMap) -> ConversionResult<()> {
        let input = read_header(headers, self.config.from_header());
        headers.remove(self.config.to_header());

        let output = transform(&self.config, &input)?;
        headers.insert(self.config.to_header().clone(), header_value(output));
        Ok(())
    }
}

/// Raw bytes of the first value of `name`, empty when the header is absent
fn read_header(headers: &HeaderMap, name: &HeaderName) -> Vec<u8> {
    headers
        .get(name)
        .map(HeaderValue::as_bytes)
        .unwrap_or_default()
        .to_vec()
}

/// The transformed bytes come from a valid header value plus affixes and
/// replacements checked when the config was built, so they are always a
/// valid header value.
fn header_value(bytes: Vec<u8>) -> HeaderValue {
    HeaderValue::from_bytes(&bytes).expect("transformed header bytes are valid")
}

/// Conversion middleware - rewrites the configured header, then forwards
///
/// On failure the request is answered with 500 and `next` is never run.
pub async fn convert_header_middleware(
    State(convert): State<Arc<ConvertHeader>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ConversionError> {
    if let Err(err) = convert.apply(request.headers_mut()) {
        error!(
            middleware = %convert.name(),
            from_header = %convert.config().from_header(),
            to_header = %convert.config().to_header(),
            error = %err,
            "{}",
            conversion::CONVERSION_FAILED
        );
        return Err(err);
    }

    debug!(
        middleware = %convert.name(),
        to_header = %convert.config().to_header(),
        conversion = %convert.config().conversion(),
        "{}",
        conversion::HEADER_REWRITTEN
    );

    Ok(next.run(request).await)
}
