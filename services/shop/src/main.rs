use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use queso_auth::password::CredentialStore;
use queso_auth::token::TokenService;
use queso_core::config::Config;
use queso_core::tracing::init_tracing;

use queso_shop::config::ShopConfig;
use queso_shop::router::build_router;
use queso_shop::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("info,sqlx=warn");

    let config = ShopConfig::from_env();

    let tokens = TokenService::from_config(
        &config.jwt_secret_key,
        &config.jwt_algorithm,
        config.access_token_expire_minutes,
    )
    .expect("invalid JWT configuration");

    let credentials = CredentialStore::with_cost(
        config.password_hash_memory_kib,
        config.password_hash_iterations,
    )
    .expect("invalid password hashing parameters");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db: Arc::new(db),
        tokens: Arc::new(tokens),
        credentials,
    };

    let router = build_router(state, &config.cors_origin_list());
    let http_addr = format!("0.0.0.0:{}", config.shop_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("shop service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
