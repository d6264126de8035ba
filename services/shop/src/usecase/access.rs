//! Access control chain: authenticate → require_active → require_admin.
//!
//! Every stage either passes the user through or fails with the error the client
//! sees. Handlers compose the stages through the `CurrentUser` and `AdminUser`
//! extractors.

use std::sync::Arc;

use queso_auth::token::TokenService;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ShopError;

// ── Authenticate ─────────────────────────────────────────────────────────────

pub struct AuthenticateUseCase<R: UserRepository> {
    pub users: R,
    pub tokens: Arc<TokenService>,
}

impl<R: UserRepository> AuthenticateUseCase<R> {
    /// Resolve the bearer credential to a stored user.
    ///
    /// Every failure collapses to [`ShopError::Unauthorized`]; the reason is only logged.
    pub async fn execute(&self, bearer: Option<&str>) -> Result<User, ShopError> {
        let Some(token) = bearer else {
            tracing::debug!(reason = "missing bearer token", "authentication failed");
            return Err(ShopError::Unauthorized);
        };
        let email = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(reason = %e, "authentication failed");
            ShopError::Unauthorized
        })?;
        match self.users.find_by_email(&email).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!(reason = "unknown subject", "authentication failed");
                Err(ShopError::Unauthorized)
            }
        }
    }
}

// ── Authorize ────────────────────────────────────────────────────────────────

/// Account-state gate. Every stored account is currently active.
pub fn require_active(user: User) -> Result<User, ShopError> {
    Ok(user)
}

pub fn require_admin(user: User) -> Result<User, ShopError> {
    if user.role.is_admin() {
        Ok(user)
    } else {
        Err(ShopError::Forbidden)
    }
}
