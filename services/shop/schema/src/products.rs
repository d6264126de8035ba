use sea_orm::entity::prelude::*;

/// Catalog product. Never hard-deleted; `active = false` hides it from the public list.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock: i32,
    /// `vaca`, `cabra` or `oveja`.
    pub milk: String,
    pub description: String,
    pub image: String,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
