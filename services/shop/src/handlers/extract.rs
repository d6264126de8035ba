//! Extractors running the access control chain ahead of a handler.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use queso_auth::bearer::bearer_token;

use crate::domain::types::User;
use crate::error::ShopError;
use crate::state::AppState;
use crate::usecase::access::{AuthenticateUseCase, require_active, require_admin};

/// An authenticated, active user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ShopError;

    // Read everything from `parts` up front and hand back a 'static future,
    // matching axum-core's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let bearer = bearer_token(&parts.headers);
        let state = state.clone();

        async move {
            let usecase = AuthenticateUseCase {
                users: state.user_repo(),
                tokens: state.tokens.clone(),
            };
            let user = usecase.execute(bearer.as_deref()).await?;
            require_active(user).map(Self)
        }
    }
}

/// An authenticated, active user holding the `ADMIN` role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ShopError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let current = CurrentUser::from_request_parts(parts, state);

        async move {
            let CurrentUser(user) = current.await?;
            require_admin(user).map(Self)
        }
    }
}
