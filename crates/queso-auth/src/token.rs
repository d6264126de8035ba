//! JWT session tokens.
//!
//! Sessions are stateless: a token is valid iff its HMAC signature checks out
//! against the shared secret and its `exp` has not passed. The token carries
//! only the subject email; the role is re-read from the store on every request.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default access-token lifetime in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Why a presented token was rejected.
///
/// Both variants end up as the same 401 for clients; the distinction exists
/// for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Errors building a [`TokenService`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum TokenConfigError {
    #[error("unknown JWT algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("JWT algorithm {0:?} is not an HMAC algorithm")]
    NotHmac(Algorithm),
    #[error("JWT secret must not be empty")]
    EmptySecret,
}

/// JWT claims payload.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | user email |
/// | `exp` | `exp` | expiry, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: u64,
}

/// A freshly signed token together with its absolute expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Build from a secret and an HMAC algorithm.
    pub fn new(
        secret: &str,
        algorithm: Algorithm,
        default_ttl: Duration,
    ) -> Result<Self, TokenConfigError> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenConfigError::NotHmac(algorithm));
        }
        if secret.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }
        Ok(Self {
            algorithm,
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl,
        })
    }

    /// Build from the textual configuration (`JWT_ALGORITHM`, minutes).
    pub fn from_config(
        secret: &str,
        algorithm: &str,
        ttl_minutes: i64,
    ) -> Result<Self, TokenConfigError> {
        let algorithm = algorithm
            .parse::<Algorithm>()
            .map_err(|_| TokenConfigError::UnknownAlgorithm(algorithm.to_owned()))?;
        Self::new(secret, algorithm, Duration::minutes(ttl_minutes))
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign a token for `identity`, valid for `ttl` (or the default lifetime).
    pub fn issue(
        &self,
        identity: &str,
        ttl: Option<Duration>,
    ) -> Result<IssuedToken, jsonwebtoken::errors::Error> {
        let expires_at = Utc::now() + ttl.unwrap_or(self.default_ttl);
        let claims = Claims {
            sub: identity.to_owned(),
            exp: u64::try_from(expires_at.timestamp()).unwrap_or(0),
        };
        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry, returning the subject identity.
    ///
    /// Zero leeway: the token is accepted through its `exp` second and
    /// reported [`TokenError::Expired`] afterwards.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(TokenError::Invalid);
        }
        Ok(data.claims.sub)
    }
}
