use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use queso_domain::id::{OrderId, UserId};
use queso_domain::order::{OrderStatus, PaymentOutcome};

use crate::domain::types::{Buyer, LineItem, Order, ShippingDetail};
use crate::error::ShopError;
use crate::handlers::extract::CurrentUser;
use crate::state::AppState;
use crate::usecase::order::{
    ConfirmPaymentUseCase, CreateOrderInput, CreateOrderUseCase, ListMyOrdersUseCase,
};

#[derive(Serialize, Deserialize)]
pub struct BuyerDto {
    pub nombre: String,
    pub email: String,
    pub dire: String,
}

#[derive(Serialize, Deserialize, Default)]
pub struct ShippingDetailDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comuna: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sucursal: Option<String>,
}

#[derive(Serialize)]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub buyer: BuyerDto,
    pub items: BTreeMap<String, LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    #[serde(rename = "shippingMethod")]
    pub shipping_method: String,
    #[serde(rename = "shippingDetail")]
    pub shipping_detail: ShippingDetailDto,
    #[serde(rename = "userId")]
    pub user_id: Option<UserId>,
    #[serde(rename = "createdAt", serialize_with = "queso_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            buyer: BuyerDto {
                nombre: o.buyer.name,
                email: o.buyer.email,
                dire: o.buyer.address,
            },
            items: o.items,
            subtotal: o.subtotal,
            shipping: o.shipping,
            total: o.total,
            shipping_method: o.shipping_method,
            shipping_detail: ShippingDetailDto {
                comuna: o.shipping_detail.comuna,
                sucursal: o.shipping_detail.branch,
            },
            user_id: o.user_id,
            created_at: o.created_at,
            status: o.status,
        }
    }
}

// ── POST /pedidos ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateOrderRequest {
    pub buyer: BuyerDto,
    pub items: BTreeMap<String, LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    #[serde(rename = "shippingMethod")]
    pub shipping_method: String,
    #[serde(rename = "shippingDetail", default)]
    pub shipping_detail: ShippingDetailDto,
}

pub async fn create_order(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ShopError> {
    let usecase = CreateOrderUseCase {
        repo: state.order_repo(),
    };
    let order = usecase
        .execute(CreateOrderInput {
            buyer: Buyer {
                name: body.buyer.nombre,
                email: body.buyer.email,
                address: body.buyer.dire,
            },
            items: body.items,
            subtotal: body.subtotal,
            shipping: body.shipping,
            total: body.total,
            shipping_method: body.shipping_method,
            shipping_detail: ShippingDetail {
                comuna: body.shipping_detail.comuna,
                branch: body.shipping_detail.sucursal,
            },
            owner: Some(user.id),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

// ── GET /pedidos/mis-pedidos ─────────────────────────────────────────────────

pub async fn list_my_orders(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ShopError> {
    let usecase = ListMyOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute(user.id).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

// ── POST /pedidos/simular_pago ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ConfirmPaymentQuery {
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// `ok` approves the payment; any other value fails it.
    pub status_pago: String,
}

#[derive(Serialize)]
pub struct ConfirmPaymentResponse {
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
    pub nuevo_status: OrderStatus,
}

pub async fn confirm_payment(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ConfirmPaymentQuery>,
) -> Result<Json<ConfirmPaymentResponse>, ShopError> {
    let order_id: OrderId = query.order_id.parse().map_err(|_| ShopError::InvalidId)?;
    let usecase = ConfirmPaymentUseCase {
        repo: state.order_repo(),
    };
    let status = usecase
        .execute(
            order_id,
            user.id,
            PaymentOutcome::from_wire(&query.status_pago),
        )
        .await?;
    Ok(Json(ConfirmPaymentResponse {
        order_id,
        nuevo_status: status,
    }))
}
