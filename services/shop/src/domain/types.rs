use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use queso_domain::id::{OrderId, ProductId, UserId};
use queso_domain::order::OrderStatus;
use queso_domain::product::MilkType;
use queso_domain::user::UserRole;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Accounts ─────────────────────────────────────────────────────────────────

/// Registered account, including the stored password digest.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub password_hash: String,
    pub addresses: Vec<Address>,
    pub created_at: DateTime<Utc>,
}

/// Shipping address owned by a user. Stored as one element of the user's JSONB array,
/// so the field names here are also the document keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub texto: String,
    pub comuna: String,
    #[serde(default)]
    pub principal: bool,
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub milk: MilkType,
    pub description: String,
    pub image: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied by an administrator when creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub milk: MilkType,
    pub description: String,
    pub image: String,
    pub active: bool,
}

/// Partial product update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub milk: Option<MilkType>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub active: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.milk.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.active.is_none()
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

/// Buyer snapshot taken at checkout. Never updated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Buyer {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// One cart line. Stored inside the order's JSONB `items` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub qty: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShippingDetail {
    pub comuna: Option<String>,
    pub branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub buyer: Buyer,
    /// Keyed by cart-line id.
    pub items: BTreeMap<String, LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub total: f64,
    pub shipping_method: String,
    pub shipping_detail: ShippingDetail,
    pub user_id: Option<UserId>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// ── Validation ───────────────────────────────────────────────────────────────

/// Structural email check: one `@`, a non-empty local part, and a dotted domain
/// without empty labels or whitespace.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn validate_product_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn validate_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

pub fn validate_stock(stock: i32) -> bool {
    stock >= 0
}
