use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ProductCondition::Enum)
                    .values([ProductCondition::New, ProductCondition::Second])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(big_integer(Products::Id).auto_increment().primary_key())
                    .col(string_len(Products::Name, 60))
                    .col(big_integer(Products::Price))
                    .col(text(Products::ImageUrl))
                    .col(integer(Products::Stock).default(0))
                    .col(
                        ColumnDef::new(Products::Condition)
                            .enumeration(
                                ProductCondition::Enum,
                                [ProductCondition::New, ProductCondition::Second],
                            )
                            .not_null(),
                    )
                    .col(text(Products::Tags).default(""))
                    .col(boolean(Products::IsPurchasable).default(true))
                    .col(integer(Products::PurchaseCount).default(0))
                    .col(big_integer(Products::UserId))
                    .col(
                        timestamp_with_time_zone(Products::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Products::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_user_id")
                            .from(Products::Table, Products::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Counters are guarded at the storage level as well.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                ALTER TABLE products
                    ADD CONSTRAINT products_stock_non_negative CHECK (stock >= 0),
                    ADD CONSTRAINT products_price_non_negative CHECK (price >= 0),
                    ADD CONSTRAINT products_purchase_count_non_negative CHECK (purchase_count >= 0)
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_user_id")
                    .table(Products::Table)
                    .col(Products::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_created_at")
                    .table(Products::Table)
                    .col(Products::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_price")
                    .table(Products::Table)
                    .col(Products::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ProductCondition::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    ImageUrl,
    Stock,
    Condition,
    Tags,
    IsPurchasable,
    PurchaseCount,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ProductCondition {
    #[sea_orm(iden = "product_condition")]
    Enum,
    #[sea_orm(iden = "new")]
    New,
    #[sea_orm(iden = "second")]
    Second,
}
