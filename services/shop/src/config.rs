use serde::Deserialize;

use queso_auth::token::DEFAULT_TOKEN_TTL_MINUTES;
use queso_core::config::Config;

const DEFAULT_CORS_ORIGINS: &str = "http://localhost,http://localhost:8080,http://127.0.0.1:5500,null";

/// Shop service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct ShopConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for access tokens. Env var: `JWT_SECRET_KEY`.
    pub jwt_secret_key: String,
    /// `HS256`, `HS384` or `HS512`. Env var: `JWT_ALGORITHM`.
    pub jwt_algorithm: String,
    #[serde(default = "default_token_ttl")]
    pub access_token_expire_minutes: i64,
    /// TCP port for the HTTP server (default 8000). Env var: `SHOP_PORT`.
    #[serde(default = "default_port")]
    pub shop_port: u16,
    /// Comma-separated list of allowed CORS origins.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
    pub password_hash_memory_kib: Option<u32>,
    pub password_hash_iterations: Option<u32>,
}

fn default_token_ttl() -> i64 {
    DEFAULT_TOKEN_TTL_MINUTES
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> String {
    DEFAULT_CORS_ORIGINS.to_owned()
}

impl Config for ShopConfig {}

impl ShopConfig {
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
