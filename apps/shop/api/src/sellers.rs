//! Seller lookups for the product domain, served by the user and bank
//! account services.

use async_trait::async_trait;
use axum_helpers::{AppError, ResourceOwner};
use domain_banks::{BankRepository, BankService};
use domain_products::{ProductResult, SellerBankAccount, SellerLookup};
use domain_users::{UserError, UserRepository, UserService};

pub struct DomainSellerLookup<U: UserRepository, B: BankRepository> {
    users: UserService<U>,
    banks: BankService<B>,
}

impl<U: UserRepository, B: BankRepository> DomainSellerLookup<U, B> {
    pub fn new(users: UserService<U>, banks: BankService<B>) -> Self {
        Self { users, banks }
    }
}

#[async_trait]
impl<U, B> SellerLookup for DomainSellerLookup<U, B>
where
    U: UserRepository + 'static,
    B: BankRepository + 'static,
{
    async fn seller_name(&self, user_id: i64) -> ProductResult<Option<String>> {
        match self.users.get_user(user_id).await {
            Ok(user) => Ok(Some(user.name)),
            Err(UserError::NotFound(_)) => Ok(None),
            Err(e) => Err(AppError::from(e).into()),
        }
    }

    async fn bank_accounts(&self, user_id: i64) -> ProductResult<Vec<SellerBankAccount>> {
        let accounts = self
            .banks
            .list_accounts(user_id)
            .await
            .map_err(AppError::from)?;

        Ok(accounts
            .into_iter()
            .map(|a| SellerBankAccount {
                bank_account_id: a.bank_account_id,
                bank_name: a.bank_name,
                bank_account_name: a.bank_account_name,
                bank_account_number: a.bank_account_number,
            })
            .collect())
    }

    async fn bank_account_owner(&self, bank_account_id: i64) -> ProductResult<Option<i64>> {
        Ok(self.banks.owner_of(bank_account_id).await?)
    }
}
