//! Token and credential fixtures.
//!
//! Tests sign real JWTs with a fixed secret so requests go through the same
//! verification path as production traffic.

use std::sync::Arc;

use http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
use queso_auth::password::CredentialStore;
use queso_auth::token::TokenService;

pub const TEST_JWT_SECRET: &str = "queso-test-secret";

/// HS256 token service with the fixed test secret and a 30 minute lifetime.
pub fn test_token_service() -> Arc<TokenService> {
    Arc::new(TokenService::from_config(TEST_JWT_SECRET, "HS256", 30).unwrap())
}

/// Argon2 store with the smallest accepted cost so tests hash quickly.
pub fn cheap_credentials() -> CredentialStore {
    CredentialStore::with_cost(Some(8), Some(1)).unwrap()
}

/// `Authorization: Bearer <token>` header value for `email`.
pub fn bearer_value(tokens: &TokenService, email: &str) -> HeaderValue {
    let issued = tokens.issue(email, None).unwrap();
    HeaderValue::from_str(&format!("Bearer {}", issued.token)).unwrap()
}

/// Header map carrying a fresh bearer token for `email`.
pub fn bearer_headers(tokens: &TokenService, email: &str) -> HeaderMap {
    let mut map = HeaderMap::new();
    map.insert(AUTHORIZATION, bearer_value(tokens, email));
    map
}
