use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::seller::SellerBankAccount;

/// Physical condition of a listed item
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "product_condition")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductCondition {
    #[sea_orm(string_value = "new")]
    New,
    /// Second hand
    #[sea_orm(string_value = "second")]
    Second,
}

/// Listing sort key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Price,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Product domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i32,
    pub condition: ProductCondition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
    /// Units sold so far; only ever grows
    pub purchase_count: i32,
    /// Seller
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product ready to insert, condition already parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i32,
    pub condition: ProductCondition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

/// Replacement for the editable fields of a product (stock excluded)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub condition: ProductCondition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

fn validate_tags(tags: &[String]) -> Result<(), validator::ValidationError> {
    // Tags are stored comma-joined
    if tags.iter().any(|t| t.trim().is_empty() || t.contains(',')) {
        return Err(validator::ValidationError::new("invalid_tag"));
    }
    Ok(())
}

/// DTO for creating a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 5, max = 60))]
    #[schema(min_length = 5, max_length = 60, example = "Used Bicycle")]
    pub name: String,
    #[validate(range(min = 0))]
    #[schema(minimum = 0, example = 50)]
    pub price: i64,
    #[validate(url)]
    #[schema(example = "https://cdn.example.com/bike.png")]
    pub image_url: String,
    #[validate(range(min = 0))]
    #[schema(minimum = 0, example = 3)]
    pub stock: i32,
    /// `new` or `second`
    #[schema(example = "second")]
    pub condition: String,
    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

/// DTO for updating a product; every editable field is replaced
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 5, max = 60))]
    #[schema(min_length = 5, max_length = 60)]
    pub name: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(url)]
    pub image_url: String,
    /// `new` or `second`
    pub condition: String,
    #[validate(custom(function = "validate_tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_purchasable: bool,
}

/// DTO for setting the stock level
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateStock {
    #[validate(range(min = 0))]
    #[schema(minimum = 0)]
    pub stock: i32,
}

/// DTO for buying a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// One of the seller's bank accounts
    #[validate(length(min = 1))]
    #[schema(example = "7")]
    pub bank_account_id: String,
    #[validate(url)]
    pub payment_proof_image_url: String,
    #[validate(range(min = 1))]
    #[schema(minimum = 1, example = 2)]
    pub quantity: i32,
}

/// Query filters for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductFilter {
    /// Page size; values <= 0 fall back to 10
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
    /// Only the caller's own products (ignored for anonymous callers)
    #[serde(default)]
    pub user_only: bool,
    /// Repeatable; every tag must match
    #[serde(default)]
    pub tags: Vec<String>,
    pub condition: Option<ProductCondition>,
    /// Include products with zero stock
    #[serde(default)]
    pub show_empty_stock: bool,
    /// Applied when > 0
    pub max_price: Option<i64>,
    /// Applied when > 0
    pub min_price: Option<i64>,
    /// Case-insensitive substring of the name
    pub search: Option<String>,
    pub sort_by: Option<SortBy>,
    pub order_by: Option<SortOrder>,
}

/// Normalized listing query handed to the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub user_id: Option<i64>,
    /// Lowercased
    pub tags: Vec<String>,
    pub condition: Option<ProductCondition>,
    pub show_empty_stock: bool,
    pub max_price: Option<i64>,
    pub min_price: Option<i64>,
    /// Lowercased
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

/// Wire shape of a product; ids are strings
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "42")]
    pub id: String,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i32,
    pub condition: ProductCondition,
    pub tags: Vec<String>,
    pub is_purchasable: bool,
    pub purchase_count: i32,
    #[schema(example = "1")]
    pub user_id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    #[schema(value_type = i64)]
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            stock: product.stock,
            condition: product.condition,
            tags: product.tags,
            is_purchasable: product.is_purchasable,
            purchase_count: product.purchase_count,
            user_id: product.user_id.to_string(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// `data` of the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductList {
    pub products: Vec<ProductResponse>,
}

/// Seller summary shown on the product page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerDetail {
    pub name: String,
    /// Units sold across all of the seller's products
    pub product_sold_total: i64,
    pub bank_accounts: Vec<SellerBankAccount>,
}

/// `data` of `GET /product/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub product: ProductResponse,
    pub seller: SellerDetail,
}

/// Tags live in one text column, comma-joined
pub(crate) fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

pub(crate) fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn create() -> CreateProduct {
        CreateProduct {
            name: "Used Bicycle".into(),
            price: 50,
            image_url: "https://cdn.example.com/bike.png".into(),
            stock: 3,
            condition: "second".into(),
            tags: vec!["bike".into()],
            is_purchasable: true,
        }
    }

    #[test]
    fn test_condition_parsing() {
        assert_eq!(ProductCondition::from_str("new").unwrap(), ProductCondition::New);
        assert_eq!(
            ProductCondition::from_str("second").unwrap(),
            ProductCondition::Second
        );
        assert!(ProductCondition::from_str("used").is_err());
        assert_eq!(ProductCondition::Second.to_string(), "second");
    }

    #[test]
    fn test_create_product_validation() {
        assert!(create().validate().is_ok());

        let bad_url = CreateProduct {
            image_url: "not a url".into(),
            ..create()
        };
        assert!(bad_url.validate().is_err());

        let negative_stock = CreateProduct {
            stock: -1,
            ..create()
        };
        assert!(negative_stock.validate().is_err());

        let comma_tag = CreateProduct {
            tags: vec!["a,b".into()],
            ..create()
        };
        assert!(comma_tag.validate().is_err());
    }

    #[test]
    fn test_purchase_request_requires_positive_quantity() {
        let request = PurchaseRequest {
            bank_account_id: "1".into(),
            payment_proof_image_url: "https://cdn.example.com/proof.png".into(),
            quantity: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_tags_round_trip_through_storage_format() {
        let tags = vec!["bike".to_string(), "outdoor".to_string()];
        assert_eq!(split_tags(&join_tags(&tags)), tags);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn test_product_response_shape() {
        let now = Utc::now();
        let response = ProductResponse::from(Product {
            id: 42,
            name: "Used Bicycle".into(),
            price: 50,
            image_url: "https://cdn.example.com/bike.png".into(),
            stock: 3,
            condition: ProductCondition::Second,
            tags: vec!["bike".into()],
            is_purchasable: true,
            purchase_count: 0,
            user_id: 1,
            created_at: now,
            updated_at: now,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], "42");
        assert_eq!(json["condition"], "second");
        assert_eq!(json["isPurchasable"], true);
        assert_eq!(json["purchaseCount"], 0);
        assert_eq!(json["createdAt"], now.timestamp_millis());
    }
}
