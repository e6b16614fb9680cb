use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{BankAccount, BankAccountInput};

/// Sea-ORM Entity for the bank_accounts table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bank_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    pub user_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for BankAccount {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            bank_name: model.bank_name,
            bank_account_name: model.bank_account_name,
            bank_account_number: model.bank_account_number,
            user_id: model.user_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    pub fn from_input(user_id: i64, input: BankAccountInput) -> Self {
        let now = chrono::Utc::now();
        Self {
            bank_name: Set(input.bank_name),
            bank_account_name: Set(input.bank_account_name),
            bank_account_number: Set(input.bank_account_number),
            user_id: Set(user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
    }

    pub fn apply_input(&mut self, input: BankAccountInput) {
        self.bank_name = Set(input.bank_name);
        self.bank_account_name = Set(input.bank_account_name);
        self.bank_account_number = Set(input.bank_account_number);
        self.updated_at = Set(chrono::Utc::now().into());
    }
}
