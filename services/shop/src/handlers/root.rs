use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use queso_core::health::readiness;

use crate::state::AppState;

// ── GET / ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BannerResponse {
    pub proyecto: &'static str,
}

pub async fn banner() -> Json<BannerResponse> {
    Json(BannerResponse {
        proyecto: "API de Queso & Sabor v1.0",
    })
}

// ── GET /readyz ──────────────────────────────────────────────────────────────

/// Ready once the store answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping()).await
}
