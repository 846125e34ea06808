//! Echo handler used as the downstream service of the standalone binary

use axum::{http::HeaderMap, Json};
use std::collections::BTreeMap;

/// Returns every request header as a JSON object of name to values
///
/// Values that are not valid UTF-8 are rendered lossily.
pub async fn echo_headers(headers: HeaderMap) -> Json<BTreeMap<String, Vec<String>>> {
    Json(collect_headers(&headers))
}

pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut collected: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}
