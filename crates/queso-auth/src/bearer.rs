//! `Authorization: Bearer <token>` parsing.

use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::HeaderMap;

/// Extract the raw bearer token from request headers.
///
/// Returns `None` when the header is absent, not a `Bearer` credential, or empty.
/// Callers treat all of these as "unauthenticated".
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.typed_get::<Authorization<Bearer>>()?;
    let token = auth.token().trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_owned())
}
