use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::UserId).uuid())
                    .col(ColumnDef::new(Orders::BuyerName).string().not_null())
                    .col(ColumnDef::new(Orders::BuyerEmail).string().not_null())
                    .col(ColumnDef::new(Orders::BuyerAddress).string().not_null())
                    .col(ColumnDef::new(Orders::Items).json_binary().not_null())
                    .col(ColumnDef::new(Orders::Subtotal).double().not_null())
                    .col(ColumnDef::new(Orders::Shipping).double().not_null())
                    .col(ColumnDef::new(Orders::Total).double().not_null())
                    .col(ColumnDef::new(Orders::ShippingMethod).string().not_null())
                    .col(ColumnDef::new(Orders::ShippingComuna).string())
                    .col(ColumnDef::new(Orders::ShippingBranch).string())
                    .col(
                        ColumnDef::new(Orders::Status)
                            .string()
                            .not_null()
                            .default("nuevo"),
                    )
                    .col(
                        ColumnDef::new(Orders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .col(Orders::CreatedAt)
                    .name("idx_orders_user_id_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    UserId,
    BuyerName,
    BuyerEmail,
    BuyerAddress,
    Items,
    Subtotal,
    Shipping,
    Total,
    ShippingMethod,
    ShippingComuna,
    ShippingBranch,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
