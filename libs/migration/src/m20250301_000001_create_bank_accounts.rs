use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000000_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BankAccounts::Table)
                    .if_not_exists()
                    .col(big_integer(BankAccounts::Id).auto_increment().primary_key())
                    .col(string_len(BankAccounts::BankName, 15))
                    .col(string_len(BankAccounts::BankAccountName, 15))
                    .col(string_len(BankAccounts::BankAccountNumber, 15))
                    .col(big_integer(BankAccounts::UserId))
                    .col(
                        timestamp_with_time_zone(BankAccounts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(BankAccounts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bank_accounts_user_id")
                            .from(BankAccounts::Table, BankAccounts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bank_accounts_user_id")
                    .table(BankAccounts::Table)
                    .col(BankAccounts::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BankAccounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BankAccounts {
    Table,
    Id,
    BankName,
    BankAccountName,
    BankAccountNumber,
    UserId,
    CreatedAt,
    UpdatedAt,
}
