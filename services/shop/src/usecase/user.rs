use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use uuid::Uuid;

use queso_auth::password::CredentialStore;
use queso_auth::token::{IssuedToken, TokenService};
use queso_domain::id::UserId;
use queso_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{Address, MIN_PASSWORD_LEN, User, validate_email, validate_password};
use crate::error::ShopError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
    pub credentials: CredentialStore,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ShopError> {
        if !validate_email(&input.email) {
            return Err(ShopError::invalid_input("email is not a valid address"));
        }
        if !validate_password(&input.password) {
            return Err(ShopError::invalid_input(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(ShopError::EmailAlreadyExists);
        }

        let credentials = self.credentials.clone();
        let password = input.password;
        let password_hash = tokio::task::spawn_blocking(move || credentials.hash(&password))
            .await
            .context("join password hashing task")?
            .context("hash password")?;

        let user = User {
            id: UserId::generate(),
            email: input.email,
            name: input.name,
            role: UserRole::default(),
            password_hash,
            addresses: Vec::new(),
            created_at: Utc::now(),
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub credentials: CredentialStore,
    pub tokens: Arc<TokenService>,
}

impl<R: UserRepository> LoginUseCase<R> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, input: LoginInput) -> Result<IssuedToken, ShopError> {
        let user = self.repo.find_by_email(&input.email).await?;

        // An unknown email still pays for one Argon2 verification.
        let credentials = self.credentials.clone();
        let password = input.password;
        let digest = user.as_ref().map(|u| u.password_hash.clone());
        let matches = tokio::task::spawn_blocking(move || match digest {
            Some(digest) => credentials.verify(&password, &digest),
            None => credentials.verify_absent(&password),
        })
        .await
        .context("join password verification task")?;
        let Some(user) = user.filter(|_| matches) else {
            return Err(ShopError::Unauthorized);
        };

        let issued = self
            .tokens
            .issue(&user.email, None)
            .context("sign access token")?;
        Ok(issued)
    }
}

// ── AddAddress ───────────────────────────────────────────────────────────────

pub struct AddAddressInput {
    pub texto: String,
    pub comuna: String,
}

pub struct AddAddressUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AddAddressUseCase<R> {
    /// The first address a user adds becomes principal; later ones never are.
    /// The store decides, so concurrent first adds still yield one principal.
    pub async fn execute(&self, user: &User, input: AddAddressInput) -> Result<Address, ShopError> {
        let address = Address {
            id: Uuid::now_v7().to_string(),
            texto: input.texto,
            comuna: input.comuna,
            principal: false,
        };
        match self.repo.push_address(user.id, &address).await? {
            Some(stored) => Ok(stored),
            None => Err(anyhow::anyhow!("address append matched no user {}", user.id).into()),
        }
    }
}
