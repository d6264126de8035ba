use std::collections::BTreeMap;

use chrono::Utc;

use queso_domain::id::{OrderId, UserId};
use queso_domain::order::{OrderStatus, PaymentOutcome};

use crate::domain::repository::OrderRepository;
use crate::domain::types::{Buyer, LineItem, Order, ShippingDetail, validate_email};
use crate::error::ShopError;

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderInput {
    pub buyer: Buyer,
    pub items: BTreeMap<String, LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub shipping_method: String,
    pub shipping_detail: ShippingDetail,
    pub owner: Option<UserId>,
}

pub struct CreateOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> CreateOrderUseCase<R> {
    /// Persist a new order in `nuevo`. Totals are stored as submitted.
    /// Not idempotent: every call creates a distinct order.
    pub async fn execute(&self, input: CreateOrderInput) -> Result<Order, ShopError> {
        if !validate_email(&input.buyer.email) {
            return Err(ShopError::invalid_input("buyer email is not a valid address"));
        }
        let order = Order {
            id: OrderId::generate(),
            buyer: input.buyer,
            items: input.items,
            subtotal: input.subtotal,
            shipping: input.shipping,
            total: input.total,
            shipping_method: input.shipping_method,
            shipping_detail: input.shipping_detail,
            user_id: input.owner,
            status: OrderStatus::New,
            created_at: Utc::now(),
        };
        self.repo.insert(&order).await?;
        tracing::info!(order_id = %order.id, total = order.total, "order created");
        Ok(order)
    }
}

// ── ListMyOrders ─────────────────────────────────────────────────────────────

pub struct ListMyOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListMyOrdersUseCase<R> {
    pub async fn execute(&self, owner: UserId) -> Result<Vec<Order>, ShopError> {
        self.repo.list_by_owner(owner).await
    }
}

// ── ConfirmPayment ───────────────────────────────────────────────────────────

pub struct ConfirmPaymentUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ConfirmPaymentUseCase<R> {
    /// Settle an order owned by `owner`. Orders owned by someone else are reported
    /// exactly like nonexistent ones.
    pub async fn execute(
        &self,
        id: OrderId,
        owner: UserId,
        outcome: PaymentOutcome,
    ) -> Result<OrderStatus, ShopError> {
        let order = self
            .repo
            .find_owned(id, owner)
            .await?
            .ok_or(ShopError::OrderNotFound)?;
        let next = order
            .status
            .settle(outcome)
            .map_err(|_| ShopError::OrderAlreadyProcessed)?;

        // Another confirmation may have settled the order since it was read.
        if !self.repo.transition_status(id, order.status, next).await? {
            return Err(ShopError::OrderAlreadyProcessed);
        }
        tracing::info!(order_id = %id, status = %next, "payment outcome recorded");
        Ok(next)
    }
}
