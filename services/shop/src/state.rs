use std::sync::Arc;

use sea_orm::DatabaseConnection;

use queso_auth::password::CredentialStore;
use queso_auth::token::TokenService;

use crate::infra::db::{DbOrderRepository, DbProductRepository, DbUserRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub tokens: Arc<TokenService>,
    pub credentials: CredentialStore,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn product_repo(&self) -> DbProductRepository {
        DbProductRepository {
            db: self.db.clone(),
        }
    }

    pub fn order_repo(&self) -> DbOrderRepository {
        DbOrderRepository {
            db: self.db.clone(),
        }
    }
}
