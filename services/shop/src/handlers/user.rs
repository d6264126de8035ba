use axum::{Form, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use queso_domain::user::UserRole;

use crate::domain::types::{Address, User};
use crate::error::ShopError;
use crate::handlers::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::user::{
    AddAddressInput, AddAddressUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};

/// Public view of an account. The password digest is never serialized.
#[derive(Serialize)]
pub struct UserResponse {
    pub email: String,
    pub nombre: String,
    pub direcciones: Vec<Address>,
    pub rol: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            nombre: user.name,
            direcciones: user.addresses,
            rol: user.role,
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub nombre: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ShopError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
        credentials: state.credentials.clone(),
    };
    let user = usecase
        .execute(RegisterInput {
            email: body.email,
            name: body.nombre,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /auth/token ─────────────────────────────────────────────────────────

/// OAuth2 password-grant form. The `username` field carries the email.
#[derive(Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<TokenRequest>,
) -> Result<Json<TokenResponse>, ShopError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        credentials: state.credentials.clone(),
        tokens: state.tokens.clone(),
    };
    let issued = usecase
        .execute(LoginInput {
            email: body.username,
            password: body.password,
        })
        .await?;
    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer",
    }))
}

// ── GET /users/me ────────────────────────────────────────────────────────────

pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

// ── POST /users/me/direcciones ───────────────────────────────────────────────

/// Any `id` or `principal` sent by the client is ignored.
#[derive(Deserialize)]
pub struct AddAddressRequest {
    pub texto: String,
    pub comuna: String,
}

pub async fn add_address(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<AddAddressRequest>,
) -> Result<(StatusCode, Json<Address>), ShopError> {
    let usecase = AddAddressUseCase {
        repo: state.user_repo(),
    };
    let address = usecase
        .execute(
            &user,
            AddAddressInput {
                texto: body.texto,
                comuna: body.comuna,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(address)))
}
