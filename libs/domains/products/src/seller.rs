//! Seller-side lookups the product domain needs from users and bank accounts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ProductResult;

/// Bank account as shown to buyers on the product page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerBankAccount {
    #[schema(example = "7")]
    pub bank_account_id: String,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
}

/// Read access to other domains, implemented by the application.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SellerLookup: Send + Sync {
    /// Display name of the user, `None` when the user does not exist
    async fn seller_name(&self, user_id: i64) -> ProductResult<Option<String>>;

    async fn bank_accounts(&self, user_id: i64) -> ProductResult<Vec<SellerBankAccount>>;

    /// Owner of a bank account, `None` when the account does not exist
    async fn bank_account_owner(&self, bank_account_id: i64) -> ProductResult<Option<i64>>;
}
