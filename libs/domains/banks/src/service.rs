use async_trait::async_trait;
use axum_helpers::{AppError, ResourceOwner};
use std::sync::Arc;
use validator::Validate;

use crate::error::{BankError, BankResult};
use crate::models::{BankAccountInput, BankAccountResponse};
use crate::repository::BankRepository;

/// Service layer for bank account business logic
#[derive(Clone)]
pub struct BankService<R: BankRepository> {
    repository: Arc<R>,
}

impl<R: BankRepository> BankService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_account(
        &self,
        user_id: i64,
        input: BankAccountInput,
    ) -> BankResult<BankAccountResponse> {
        validate(&input)?;
        let account = self.repository.create(user_id, input).await?;
        Ok(account.into())
    }

    /// Accounts of the given user only
    pub async fn list_accounts(&self, user_id: i64) -> BankResult<Vec<BankAccountResponse>> {
        let accounts = self.repository.list_by_user(user_id).await?;
        Ok(accounts.into_iter().map(Into::into).collect())
    }

    pub async fn update_account(
        &self,
        id: i64,
        input: BankAccountInput,
    ) -> BankResult<BankAccountResponse> {
        validate(&input)?;
        let account = self.repository.update(id, input).await?;
        Ok(account.into())
    }

    pub async fn delete_account(&self, id: i64) -> BankResult<BankAccountResponse> {
        let account = self.repository.delete(id).await?;
        Ok(account.into())
    }
}

fn validate(input: &BankAccountInput) -> BankResult<()> {
    input
        .validate()
        .map_err(|e| BankError::Validation(e.to_string()))
}

#[async_trait]
impl<R: BankRepository + 'static> ResourceOwner for BankService<R> {
    async fn owner_of(&self, id: i64) -> Result<Option<i64>, AppError> {
        Ok(self.repository.get_by_id(id).await?.map(|a| a.user_id))
    }

    fn resource_name(&self) -> &'static str {
        "bank account"
    }
}
