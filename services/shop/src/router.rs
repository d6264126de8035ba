use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use queso_core::health::healthz;
use queso_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    order::{confirm_payment, create_order, list_my_orders},
    product::{create_product, get_product, list_products, update_product},
    root::{banner, readyz},
    user::{add_address, get_me, login, register},
};
use crate::state::AppState;

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(banner))
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/token", post(login))
        // Users
        .route("/users/me", get(get_me))
        .route("/users/me/direcciones", post(add_address))
        // Catalog
        .route("/productos", get(list_products).post(create_product))
        .route("/productos/{id}", get(get_product).put(update_product))
        // Orders
        .route("/pedidos", post(create_order))
        .route("/pedidos/mis-pedidos", get(list_my_orders))
        .route("/pedidos/simular_pago", post(confirm_payment))
        .with_state(state)
        // Outermost first: the request id must exist before the trace span opens.
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(trace_layer())
                .layer(propagate_request_id_layer())
                .layer(cors_layer(cors_origins)),
        )
}

/// Credentialed CORS for the configured origins. Methods and headers mirror the preflight.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
