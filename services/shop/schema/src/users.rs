use sea_orm::entity::prelude::*;

/// Registered shop account.
///
/// `addresses` is a JSONB array of `{id, texto, comuna, principal}` documents,
/// appended in place; the account owns them and they have no table of their own.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    /// `CLIENTE` or `ADMIN`.
    pub role: String,
    pub password_hash: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub addresses: Json,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
