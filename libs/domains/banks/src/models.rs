use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Bank account domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub id: i64,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    /// Owning user
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of both create and update; every field is required
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountInput {
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15, example = "Bank Jago")]
    pub bank_name: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15, example = "John Doe")]
    pub bank_account_name: String,
    #[validate(length(min = 5, max = 15))]
    #[schema(min_length = 5, max_length = 15, example = "1234567890")]
    pub bank_account_number: String,
}

/// Wire shape of a bank account; ids are strings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccountResponse {
    #[schema(example = "7")]
    pub bank_account_id: String,
    pub bank_name: String,
    pub bank_account_name: String,
    pub bank_account_number: String,
    #[schema(example = "1")]
    pub user_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub updated_at: DateTime<Utc>,
}

impl From<BankAccount> for BankAccountResponse {
    fn from(account: BankAccount) -> Self {
        Self {
            bank_account_id: account.id.to_string(),
            bank_name: account.bank_name,
            bank_account_name: account.bank_account_name,
            bank_account_number: account.bank_account_number,
            user_id: account.user_id.to_string(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_length_rules() {
        let valid = BankAccountInput {
            bank_name: "Bank Jago".into(),
            bank_account_name: "John Doe".into(),
            bank_account_number: "1234567890".into(),
        };
        assert!(valid.validate().is_ok());

        let short = BankAccountInput {
            bank_name: "BCA".into(),
            ..valid.clone()
        };
        let errors = short.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("bank_name"));

        let long = BankAccountInput {
            bank_account_number: "1".repeat(16),
            ..valid
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_response_renders_ids_as_strings() {
        let now = Utc::now();
        let response = BankAccountResponse::from(BankAccount {
            id: 7,
            bank_name: "Bank Jago".into(),
            bank_account_name: "John Doe".into(),
            bank_account_number: "1234567890".into(),
            user_id: 3,
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["bankAccountId"], "7");
        assert_eq!(json["userId"], "3");
        assert_eq!(json["createdAt"], now.timestamp_millis());
    }
}
