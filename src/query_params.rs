//! A query string extractor that never rejects a request.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;

/// Extracts `T` from the query string, keeping the first value of repeated keys.
///
/// Unlike [axum::extract::Query], a query string that cannot be deserialized
/// falls back to `T::default()` instead of a 400 response, so every field of
/// `T` should be optional.
#[derive(Debug, Clone, Default)]
pub struct LenientQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for LenientQuery<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parse_query(parts.uri.query().unwrap_or_default())))
    }
}

fn parse_query<T>(query: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();

    let mut first_values: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        if !first_values.iter().any(|(seen, _)| *seen == key) {
            first_values.push((key, value));
        }
    }

    serde_urlencoded::to_string(&first_values)
        .ok()
        .and_then(|deduplicated| serde_urlencoded::from_str(&deduplicated).ok())
        .unwrap_or_else(|| {
            tracing::warn!("Could not parse query string {query:?}, using defaults");
            T::default()
        })
}
