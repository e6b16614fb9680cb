use async_trait::async_trait;
use axum_helpers::{AppError, PageMeta, Pagination, ResourceOwner};
use observability::{Outcome, ShopMetrics};
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, NewProduct, Product, ProductChanges, ProductCondition, ProductDetail,
    ProductFilter, ProductQuery, ProductResponse, PurchaseRequest, SellerDetail, UpdateProduct,
    UpdateStock,
};
use crate::repository::ProductRepository;
use crate::seller::SellerLookup;

/// Service layer for product business logic
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    sellers: Arc<dyn SellerLookup>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, sellers: Arc<dyn SellerLookup>) -> Self {
        Self {
            repository: Arc::new(repository),
            sellers,
        }
    }

    /// List a new product for `user_id`
    pub async fn create_product(
        &self,
        user_id: i64,
        input: CreateProduct,
    ) -> ProductResult<ProductResponse> {
        validate(&input)?;
        let condition = parse_condition(&input.condition)?;

        let product = self
            .repository
            .create(
                user_id,
                NewProduct {
                    name: input.name,
                    price: input.price,
                    image_url: input.image_url,
                    stock: input.stock,
                    condition,
                    tags: input.tags,
                    is_purchasable: input.is_purchasable,
                },
            )
            .await?;

        ShopMetrics::product_created(&condition.to_string());
        Ok(product.into())
    }

    /// Filtered, paginated listing. `caller` is the authenticated user, if any.
    pub async fn list_products(
        &self,
        filter: ProductFilter,
        caller: Option<i64>,
    ) -> ProductResult<(Vec<ProductResponse>, PageMeta)> {
        let (query, page) = to_query(filter, caller)?;
        let (products, total) = self.repository.list(&query).await?;

        Ok((
            products.into_iter().map(Into::into).collect(),
            page.meta(total),
        ))
    }

    /// Product with its seller's name, units sold and bank accounts
    pub async fn get_product(&self, id: i64) -> ProductResult<ProductDetail> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;
        let seller_id = product.user_id;

        let (name, product_sold_total, bank_accounts) = tokio::try_join!(
            self.sellers.seller_name(seller_id),
            self.repository.total_sold_by_user(seller_id),
            self.sellers.bank_accounts(seller_id),
        )?;

        let name =
            name.ok_or_else(|| AppError::NotFound(format!("seller {seller_id} not found")))?;

        Ok(ProductDetail {
            product: product.into(),
            seller: SellerDetail {
                name,
                product_sold_total,
                bank_accounts,
            },
        })
    }

    pub async fn update_product(
        &self,
        id: i64,
        input: UpdateProduct,
    ) -> ProductResult<ProductResponse> {
        validate(&input)?;
        let condition = parse_condition(&input.condition)?;

        let product = self
            .repository
            .update(
                id,
                ProductChanges {
                    name: input.name,
                    price: input.price,
                    image_url: input.image_url,
                    condition,
                    tags: input.tags,
                    is_purchasable: input.is_purchasable,
                },
            )
            .await?;

        Ok(product.into())
    }

    pub async fn update_stock(&self, id: i64, input: UpdateStock) -> ProductResult<ProductResponse> {
        validate(&input)?;
        let product = self.repository.update_stock(id, input.stock).await?;
        Ok(product.into())
    }

    pub async fn delete_product(&self, id: i64) -> ProductResult<ProductResponse> {
        let product = self.repository.delete(id).await?;
        Ok(product.into())
    }

    /// Buy `quantity` units, paying into one of the seller's bank accounts
    pub async fn purchase(&self, id: i64, input: PurchaseRequest) -> ProductResult<ProductResponse> {
        validate(&input)?;

        let result = self.checked_purchase(id, &input).await;
        let outcome = match &result {
            Ok(_) => Outcome::Success,
            Err(ProductError::Database(_) | ProductError::Upstream(_)) => Outcome::Failed,
            Err(_) => Outcome::Rejected,
        };
        ShopMetrics::purchase(outcome, input.quantity as u64);

        Ok(result?.into())
    }

    async fn checked_purchase(
        &self,
        id: i64,
        input: &PurchaseRequest,
    ) -> ProductResult<Product> {
        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if !product.is_purchasable {
            return Err(ProductError::NotPurchasable);
        }

        let bank_account_id: i64 = input.bank_account_id.trim().parse().map_err(|_| {
            ProductError::Validation(format!("invalid bankAccountId: {}", input.bank_account_id))
        })?;

        let owner = self
            .sellers
            .bank_account_owner(bank_account_id)
            .await?
            .ok_or_else(|| ProductError::BankAccountNotFound(input.bank_account_id.clone()))?;

        if owner != product.user_id {
            tracing::info!(product_id = id, bank_account_id, "Bank account is not the seller's");
            return Err(ProductError::BankAccountMismatch);
        }

        self.repository.purchase(id, input.quantity).await
    }
}

fn validate(input: &impl Validate) -> ProductResult<()> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(e.to_string()))
}

fn parse_condition(raw: &str) -> ProductResult<ProductCondition> {
    ProductCondition::from_str(raw).map_err(|_| ProductError::InvalidCondition(raw.to_string()))
}

fn non_empty_lowercase(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_lowercase())
}

fn to_query(
    filter: ProductFilter,
    caller: Option<i64>,
) -> ProductResult<(ProductQuery, Pagination)> {
    // Stored tags are comma-joined; a comma would match across two tags
    if filter.tags.iter().any(|t| t.contains(',')) {
        return Err(ProductError::Validation(
            "tags must not contain commas".to_string(),
        ));
    }

    let page = Pagination {
        limit: filter.limit,
        offset: filter.offset,
    };

    let query = ProductQuery {
        user_id: caller.filter(|_| filter.user_only),
        tags: filter
            .tags
            .iter()
            .map(String::as_str)
            .filter_map(non_empty_lowercase)
            .collect(),
        condition: filter.condition,
        show_empty_stock: filter.show_empty_stock,
        max_price: filter.max_price.filter(|p| *p > 0),
        min_price: filter.min_price.filter(|p| *p > 0),
        search: filter.search.as_deref().and_then(non_empty_lowercase),
        sort_by: filter.sort_by.unwrap_or_default(),
        order: filter.order_by.unwrap_or_default(),
        limit: page.limit(),
        offset: page.offset(),
    };

    Ok((query, page))
}

#[async_trait]
impl<R: ProductRepository + 'static> ResourceOwner for ProductService<R> {
    async fn owner_of(&self, id: i64) -> Result<Option<i64>, AppError> {
        Ok(self.repository.get_by_id(id).await?.map(|p| p.user_id))
    }

    fn resource_name(&self) -> &'static str {
        "product"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortBy, SortOrder};
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use crate::seller::{MockSellerLookup, SellerBankAccount};
    use chrono::Utc;
    use mockall::predicate::eq;

    const SELLER: i64 = 1;
    const SELLER_ACCOUNT: i64 = 7;

    fn sellers() -> Arc<dyn SellerLookup> {
        let mut sellers = MockSellerLookup::new();
        sellers
            .expect_seller_name()
            .returning(|_| Ok(Some("Seller Name".to_string())));
        sellers.expect_bank_accounts().returning(|_| {
            Ok(vec![SellerBankAccount {
                bank_account_id: SELLER_ACCOUNT.to_string(),
                bank_name: "Bank Jago".to_string(),
                bank_account_name: "Seller Name".to_string(),
                bank_account_number: "1234567890".to_string(),
            }])
        });
        sellers
            .expect_bank_account_owner()
            .returning(|id| {
                Ok(match id {
                    SELLER_ACCOUNT => Some(SELLER),
                    8 => Some(2),
                    _ => None,
                })
            });
        Arc::new(sellers)
    }

    fn service() -> ProductService<InMemoryProductRepository> {
        ProductService::new(InMemoryProductRepository::new(), sellers())
    }

    fn bicycle() -> CreateProduct {
        CreateProduct {
            name: "Used Bicycle".to_string(),
            price: 50,
            image_url: "https://cdn.example.com/bike.png".to_string(),
            stock: 3,
            condition: "second".to_string(),
            tags: vec!["Bike".to_string(), "outdoor".to_string()],
            is_purchasable: true,
        }
    }

    fn buy(quantity: i32, bank_account_id: i64) -> PurchaseRequest {
        PurchaseRequest {
            bank_account_id: bank_account_id.to_string(),
            payment_proof_image_url: "https://cdn.example.com/proof.png".to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_product_parses_condition() {
        let service = service();

        let product = service.create_product(SELLER, bicycle()).await.unwrap();
        assert_eq!(product.condition, ProductCondition::Second);
        assert_eq!(product.purchase_count, 0);
        assert_eq!(product.user_id, SELLER.to_string());
    }

    #[tokio::test]
    async fn test_create_product_rejects_unknown_condition() {
        let mut repository = MockProductRepository::new();
        repository.expect_create().never();
        let service = ProductService::new(repository, sellers());

        let input = CreateProduct {
            condition: "used".to_string(),
            ..bicycle()
        };
        let err = service.create_product(SELLER, input).await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidCondition(_)));
        assert_eq!(err.to_string(), "invalid condition");
    }

    #[tokio::test]
    async fn test_get_product_includes_seller_detail() {
        let service = service();
        let created = service.create_product(SELLER, bicycle()).await.unwrap();
        let id: i64 = created.id.parse().unwrap();
        service.purchase(id, buy(2, SELLER_ACCOUNT)).await.unwrap();

        let detail = service.get_product(id).await.unwrap();
        assert_eq!(detail.product.stock, 1);
        assert_eq!(detail.seller.name, "Seller Name");
        assert_eq!(detail.seller.product_sold_total, 2);
        assert_eq!(detail.seller.bank_accounts.len(), 1);
    }

    #[tokio::test]
    async fn test_purchase_insufficient_stock() {
        let service = service();
        let created = service.create_product(SELLER, bicycle()).await.unwrap();
        let id: i64 = created.id.parse().unwrap();

        let err = service.purchase(id, buy(4, SELLER_ACCOUNT)).await.unwrap_err();
        assert_eq!(err.to_string(), "insufficient stock");

        let detail = service.get_product(id).await.unwrap();
        assert_eq!(detail.product.stock, 3);
        assert_eq!(detail.product.purchase_count, 0);
    }

    #[tokio::test]
    async fn test_purchase_checks_bank_account() {
        let service = service();
        let created = service.create_product(SELLER, bicycle()).await.unwrap();
        let id: i64 = created.id.parse().unwrap();

        let mismatch = service.purchase(id, buy(1, 8)).await.unwrap_err();
        assert!(matches!(mismatch, ProductError::BankAccountMismatch));

        let missing = service.purchase(id, buy(1, 99)).await.unwrap_err();
        assert!(matches!(missing, ProductError::BankAccountNotFound(_)));

        let garbage = PurchaseRequest {
            bank_account_id: "abc".to_string(),
            ..buy(1, SELLER_ACCOUNT)
        };
        let invalid = service.purchase(id, garbage).await.unwrap_err();
        assert!(matches!(invalid, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_purchase_rejects_unpurchasable_product() {
        let mut repository = MockProductRepository::new();
        let now = Utc::now();
        repository.expect_get_by_id().with(eq(5)).returning(move |id| {
            Ok(Some(Product {
                id,
                name: "Display Only".to_string(),
                price: 10,
                image_url: "https://cdn.example.com/x.png".to_string(),
                stock: 10,
                condition: ProductCondition::New,
                tags: vec![],
                is_purchasable: false,
                purchase_count: 0,
                user_id: SELLER,
                created_at: now,
                updated_at: now,
            }))
        });
        repository.expect_purchase().never();
        let service = ProductService::new(repository, sellers());

        let err = service.purchase(5, buy(1, SELLER_ACCOUNT)).await.unwrap_err();
        assert!(matches!(err, ProductError::NotPurchasable));
    }

    #[tokio::test]
    async fn test_purchase_missing_product() {
        let service = service();
        let err = service.purchase(42, buy(1, SELLER_ACCOUNT)).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(42)));
    }

    #[test]
    fn test_to_query_applies_defaults() {
        let (query, page) = to_query(ProductFilter::default(), Some(3)).unwrap();
        assert_eq!(query.user_id, None);
        assert_eq!(query.sort_by, SortBy::Date);
        assert_eq!(query.order, SortOrder::Desc);
        assert_eq!((query.limit, query.offset), (10, 0));
        assert_eq!(page.meta(0).limit, 10);
    }

    #[test]
    fn test_to_query_normalizes_filters() {
        let filter = ProductFilter {
            user_only: true,
            tags: vec![" Bike ".to_string(), "".to_string()],
            search: Some("  ".to_string()),
            max_price: Some(0),
            min_price: Some(5),
            limit: Some(-1),
            offset: Some(-2),
            ..Default::default()
        };

        let (query, _) = to_query(filter.clone(), Some(3)).unwrap();
        assert_eq!(query.user_id, Some(3));
        assert_eq!(query.tags, vec!["bike".to_string()]);
        assert_eq!(query.search, None);
        assert_eq!(query.max_price, None);
        assert_eq!(query.min_price, Some(5));
        assert_eq!((query.limit, query.offset), (10, 0));

        // userOnly means nothing to an anonymous caller
        let (anonymous, _) = to_query(filter, None).unwrap();
        assert_eq!(anonymous.user_id, None);
    }

    #[tokio::test]
    async fn test_list_rejects_comma_in_tag() {
        let service = service();
        service.create_product(SELLER, bicycle()).await.unwrap();

        let filter = ProductFilter {
            tags: vec!["ke,ro".to_string()],
            ..Default::default()
        };
        let err = service.list_products(filter, None).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(msg) if msg.contains("commas")));
    }

    #[tokio::test]
    async fn test_owner_of() {
        let service = service();
        service.create_product(SELLER, bicycle()).await.unwrap();

        assert_eq!(service.owner_of(1).await.unwrap(), Some(SELLER));
        assert_eq!(service.owner_of(2).await.unwrap(), None);
        assert_eq!(service.resource_name(), "product");
    }
}
