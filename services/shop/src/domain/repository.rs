#![allow(async_fn_in_trait)]

use queso_domain::id::{OrderId, ProductId, UserId};
use queso_domain::order::OrderStatus;

use crate::domain::types::{Address, NewProduct, Order, Product, ProductPatch, User};
use crate::error::ShopError;

pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ShopError>;

    /// Insert a new account. A duplicate email yields [`ShopError::EmailAlreadyExists`].
    async fn create(&self, user: &User) -> Result<(), ShopError>;

    /// Append `address` to the user's list and return the stored element.
    ///
    /// The incoming `principal` flag is ignored: the store sets it in the same
    /// write, to whether the list was empty at that moment. `None` when no user matched.
    async fn push_address(
        &self,
        user_id: UserId,
        address: &Address,
    ) -> Result<Option<Address>, ShopError>;
}

pub trait ProductRepository: Send + Sync {
    async fn insert(&self, id: ProductId, product: &NewProduct) -> Result<Product, ShopError>;

    async fn list_active(&self) -> Result<Vec<Product>, ShopError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ShopError>;

    /// Apply a non-empty patch and refresh `updated_at`. `None` when the product does not exist.
    async fn update(&self, id: ProductId, patch: &ProductPatch)
    -> Result<Option<Product>, ShopError>;
}

pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: &Order) -> Result<(), ShopError>;

    /// Orders owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Order>, ShopError>;

    /// The order with `id` if and only if it belongs to `owner`.
    async fn find_owned(&self, id: OrderId, owner: UserId) -> Result<Option<Order>, ShopError>;

    /// Move the order from `from` to `to` in one conditional write.
    /// Returns `false` when the stored status was no longer `from`.
    async fn transition_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, ShopError>;
}
