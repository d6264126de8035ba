use sea_orm::entity::prelude::*;

/// Checkout order.
///
/// Buyer and shipping fields are a snapshot taken at checkout. `items` is a JSONB
/// object keyed by cart-line id. `status` only ever moves out of `nuevo` once.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub buyer_name: String,
    pub buyer_email: String,
    pub buyer_address: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,
    #[sea_orm(column_type = "Double")]
    pub subtotal: f64,
    #[sea_orm(column_type = "Double")]
    pub shipping: f64,
    #[sea_orm(column_type = "Double")]
    pub total: f64,
    pub shipping_method: String,
    pub shipping_comuna: Option<String>,
    pub shipping_branch: Option<String>,
    /// `nuevo`, `en_preparacion` or `pago_fallido`.
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
