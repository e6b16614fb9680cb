use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{BankError, BankResult};
use crate::models::{BankAccount, BankAccountInput};

/// Repository trait for BankAccount persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankRepository: Send + Sync {
    /// Create an account owned by `user_id`
    async fn create(&self, user_id: i64, input: BankAccountInput) -> BankResult<BankAccount>;

    /// Get an account by ID
    async fn get_by_id(&self, id: i64) -> BankResult<Option<BankAccount>>;

    /// All accounts of one user, oldest first
    async fn list_by_user(&self, user_id: i64) -> BankResult<Vec<BankAccount>>;

    /// Replace the editable fields; `NotFound` when the row is gone
    async fn update(&self, id: i64, input: BankAccountInput) -> BankResult<BankAccount>;

    /// Hard delete, returning the removed row; `NotFound` when the row is gone
    async fn delete(&self, id: i64) -> BankResult<BankAccount>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    accounts: BTreeMap<i64, BankAccount>,
}

/// In-memory implementation of BankRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBankRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBankRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BankRepository for InMemoryBankRepository {
    async fn create(&self, user_id: i64, input: BankAccountInput) -> BankResult<BankAccount> {
        let mut store = self.store.write().await;

        store.next_id += 1;
        let now = Utc::now();
        let account = BankAccount {
            id: store.next_id,
            bank_name: input.bank_name,
            bank_account_name: input.bank_account_name,
            bank_account_number: input.bank_account_number,
            user_id,
            created_at: now,
            updated_at: now,
        };
        store.accounts.insert(account.id, account.clone());

        tracing::info!(bank_account_id = account.id, user_id, "Created bank account");
        Ok(account)
    }

    async fn get_by_id(&self, id: i64) -> BankResult<Option<BankAccount>> {
        let store = self.store.read().await;
        Ok(store.accounts.get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: i64) -> BankResult<Vec<BankAccount>> {
        let store = self.store.read().await;
        Ok(store
            .accounts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, input: BankAccountInput) -> BankResult<BankAccount> {
        let mut store = self.store.write().await;
        let account = store.accounts.get_mut(&id).ok_or(BankError::NotFound(id))?;

        account.bank_name = input.bank_name;
        account.bank_account_name = input.bank_account_name;
        account.bank_account_number = input.bank_account_number;
        account.updated_at = Utc::now();

        tracing::info!(bank_account_id = id, "Updated bank account");
        Ok(account.clone())
    }

    async fn delete(&self, id: i64) -> BankResult<BankAccount> {
        let mut store = self.store.write().await;
        let account = store.accounts.remove(&id).ok_or(BankError::NotFound(id))?;

        tracing::info!(bank_account_id = id, "Deleted bank account");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(number: &str) -> BankAccountInput {
        BankAccountInput {
            bank_name: "Bank Jago".to_string(),
            bank_account_name: "John Doe".to_string(),
            bank_account_number: number.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_user() {
        let repo = InMemoryBankRepository::new();
        repo.create(1, input("1111111111")).await.unwrap();
        repo.create(2, input("2222222222")).await.unwrap();
        repo.create(1, input("3333333333")).await.unwrap();

        let accounts = repo.list_by_user(1).await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert!(accounts.iter().all(|a| a.user_id == 1));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_account() {
        let repo = InMemoryBankRepository::new();

        assert!(matches!(
            repo.update(9, input("1111111111")).await,
            Err(BankError::NotFound(9))
        ));
        assert!(matches!(repo.delete(9).await, Err(BankError::NotFound(9))));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_account() {
        let repo = InMemoryBankRepository::new();
        let created = repo.create(1, input("1111111111")).await.unwrap();

        let deleted = repo.delete(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }
}
