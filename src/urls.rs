//! Navigation URL helpers
//!
//! Pure, stateless query-string building and parsing for plugin
//! navigation URLs and feed requests.

use std::collections::HashMap;

use url::form_urlencoded;

/// Serialize a set of key-value pairs into a percent-encoded query string
/// appended to a base entry point.
pub fn build_url<I, K, V>(entry_point: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query: String = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{entry_point}?{query}")
}

/// Parse a query string (with or without a leading `?`) back into a map.
#[must_use]
pub fn parse_params(query: &str) -> HashMap<String, String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
