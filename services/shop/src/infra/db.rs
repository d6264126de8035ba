use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, Statement, sea_query::Expr,
};

use queso_domain::id::{OrderId, ProductId, UserId};
use queso_domain::order::OrderStatus;
use queso_shop_schema::{orders, products, users};

use crate::domain::repository::{OrderRepository, ProductRepository, UserRepository};
use crate::domain::types::{
    Address, Buyer, LineItem, NewProduct, Order, Product, ProductPatch, ShippingDetail, User,
};
use crate::error::ShopError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ShopError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn create(&self, user: &User) -> Result<(), ShopError> {
        let addresses = serde_json::to_value(&user.addresses).context("encode addresses")?;
        let result = users::ActiveModel {
            id: Set(user.id.0),
            email: Set(user.email.clone()),
            name: Set(user.name.clone()),
            role: Set(user.role.as_str().to_owned()),
            password_hash: Set(user.password_hash.clone()),
            addresses: Set(addresses),
            created_at: Set(user.created_at),
        }
        .insert(self.db.as_ref())
        .await;

        match result {
            Ok(_) => Ok(()),
            // Two registrations racing past the up-front email check.
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(ShopError::EmailAlreadyExists)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }

    async fn push_address(
        &self,
        user_id: UserId,
        address: &Address,
    ) -> Result<Option<Address>, ShopError> {
        let element = serde_json::to_value(address).context("encode address")?;
        // The row lock taken by UPDATE serializes concurrent appends, so the
        // length check always sees the list as the previous writer left it.
        let row = self
            .db
            .query_one(Statement::from_sql_and_values(
                self.db.get_database_backend(),
                "UPDATE users \
                 SET addresses = addresses || jsonb_build_array(\
                     jsonb_set($1::jsonb, '{principal}', to_jsonb(jsonb_array_length(addresses) = 0))) \
                 WHERE id = $2 \
                 RETURNING addresses -> -1 AS address",
                [element.into(), user_id.0.into()],
            ))
            .await
            .context("push user address")?;
        let Some(row) = row else {
            return Ok(None);
        };
        let stored: serde_json::Value = row
            .try_get("", "address")
            .context("read appended address")?;
        let stored = serde_json::from_value(stored).context("decode appended address")?;
        Ok(Some(stored))
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    Ok(User {
        id: UserId(model.id),
        role: model.role.parse().context("stored user role")?,
        addresses: serde_json::from_value(model.addresses).context("stored user addresses")?,
        email: model.email,
        name: model.name,
        password_hash: model.password_hash,
        created_at: model.created_at,
    })
}

// ── Product repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProductRepository {
    pub db: Arc<DatabaseConnection>,
}

impl ProductRepository for DbProductRepository {
    async fn insert(&self, id: ProductId, product: &NewProduct) -> Result<Product, ShopError> {
        let now = Utc::now();
        let model = products::ActiveModel {
            id: Set(id.0),
            name: Set(product.name.clone()),
            price: Set(product.price),
            stock: Set(product.stock),
            milk: Set(product.milk.as_str().to_owned()),
            description: Set(product.description.clone()),
            image: Set(product.image.clone()),
            active: Set(product.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await
        .context("insert product")?;
        Ok(product_from_model(model)?)
    }

    async fn list_active(&self) -> Result<Vec<Product>, ShopError> {
        let models = products::Entity::find()
            .filter(products::Column::Active.eq(true))
            .order_by_asc(products::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .context("list active products")?;
        Ok(models
            .into_iter()
            .map(product_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ShopError> {
        let model = products::Entity::find_by_id(id.0)
            .one(self.db.as_ref())
            .await
            .context("find product by id")?;
        Ok(model.map(product_from_model).transpose()?)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ShopError> {
        let mut am = products::ActiveModel {
            id: Set(id.0),
            ..Default::default()
        };
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(price) = patch.price {
            am.price = Set(price);
        }
        if let Some(stock) = patch.stock {
            am.stock = Set(stock);
        }
        if let Some(milk) = patch.milk {
            am.milk = Set(milk.as_str().to_owned());
        }
        if let Some(description) = &patch.description {
            am.description = Set(description.clone());
        }
        if let Some(image) = &patch.image {
            am.image = Set(image.clone());
        }
        if let Some(active) = patch.active {
            am.active = Set(active);
        }
        am.updated_at = Set(Utc::now());

        match am.update(self.db.as_ref()).await {
            Ok(model) => Ok(Some(product_from_model(model)?)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(anyhow::Error::new(e).context("update product").into()),
        }
    }
}

fn product_from_model(model: products::Model) -> anyhow::Result<Product> {
    Ok(Product {
        id: ProductId(model.id),
        milk: model.milk.parse().context("stored milk type")?,
        name: model.name,
        price: model.price,
        stock: model.stock,
        description: model.description,
        image: model.image,
        active: model.active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: Arc<DatabaseConnection>,
}

impl OrderRepository for DbOrderRepository {
    async fn insert(&self, order: &Order) -> Result<(), ShopError> {
        let items = serde_json::to_value(&order.items).context("encode order items")?;
        orders::ActiveModel {
            id: Set(order.id.0),
            user_id: Set(order.user_id.map(|id| id.0)),
            buyer_name: Set(order.buyer.name.clone()),
            buyer_email: Set(order.buyer.email.clone()),
            buyer_address: Set(order.buyer.address.clone()),
            items: Set(items),
            subtotal: Set(order.subtotal),
            shipping: Set(order.shipping),
            total: Set(order.total),
            shipping_method: Set(order.shipping_method.clone()),
            shipping_comuna: Set(order.shipping_detail.comuna.clone()),
            shipping_branch: Set(order.shipping_detail.branch.clone()),
            status: Set(order.status.as_str().to_owned()),
            created_at: Set(order.created_at),
        }
        .insert(self.db.as_ref())
        .await
        .context("insert order")?;
        Ok(())
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Order>, ShopError> {
        let models = orders::Entity::find()
            .filter(orders::Column::UserId.eq(owner.0))
            .order_by_desc(orders::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .context("list orders by owner")?;
        Ok(models
            .into_iter()
            .map(order_from_model)
            .collect::<anyhow::Result<_>>()?)
    }

    async fn find_owned(&self, id: OrderId, owner: UserId) -> Result<Option<Order>, ShopError> {
        let model = orders::Entity::find()
            .filter(orders::Column::Id.eq(id.0))
            .filter(orders::Column::UserId.eq(owner.0))
            .one(self.db.as_ref())
            .await
            .context("find owned order")?;
        Ok(model.map(order_from_model).transpose()?)
    }

    async fn transition_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<bool, ShopError> {
        let result = orders::Entity::update_many()
            .col_expr(orders::Column::Status, Expr::value(to.as_str()))
            .filter(orders::Column::Id.eq(id.0))
            .filter(orders::Column::Status.eq(from.as_str()))
            .exec(self.db.as_ref())
            .await
            .context("transition order status")?;
        Ok(result.rows_affected == 1)
    }
}

fn order_from_model(model: orders::Model) -> anyhow::Result<Order> {
    let items: BTreeMap<String, LineItem> =
        serde_json::from_value(model.items).context("stored order items")?;
    Ok(Order {
        id: OrderId(model.id),
        buyer: Buyer {
            name: model.buyer_name,
            email: model.buyer_email,
            address: model.buyer_address,
        },
        items,
        subtotal: model.subtotal,
        shipping: model.shipping,
        total: model.total,
        shipping_method: model.shipping_method,
        shipping_detail: ShippingDetail {
            comuna: model.shipping_comuna,
            branch: model.shipping_branch,
        },
        user_id: model.user_id.map(UserId),
        status: model.status.parse().context("stored order status")?,
        created_at: model.created_at,
    })
}
