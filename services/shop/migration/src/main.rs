use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(queso_shop_migration::Migrator).await;
}
