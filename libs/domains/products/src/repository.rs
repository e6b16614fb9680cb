use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    NewProduct, Product, ProductChanges, ProductQuery, SortBy, SortOrder, join_tags,
};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a product listed by `user_id`
    async fn create(&self, user_id: i64, product: NewProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// One page of matching products plus the total number of matches
    async fn list(&self, query: &ProductQuery) -> ProductResult<(Vec<Product>, u64)>;

    /// Replace the editable fields; `NotFound` when the row is gone
    async fn update(&self, id: i64, changes: ProductChanges) -> ProductResult<Product>;

    /// Set the stock level; `NotFound` when the row is gone
    async fn update_stock(&self, id: i64, stock: i32) -> ProductResult<Product>;

    /// Hard delete, returning the removed row
    async fn delete(&self, id: i64) -> ProductResult<Product>;

    /// Atomically take `quantity` units out of stock and add them to the
    /// purchase count. Leaves the row untouched on `InsufficientStock`.
    async fn purchase(&self, id: i64, quantity: i32) -> ProductResult<Product>;

    /// Sum of `purchase_count` over every product of the seller
    async fn total_sold_by_user(&self, user_id: i64) -> ProductResult<i64>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    products: BTreeMap<i64, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(product: &Product, query: &ProductQuery) -> bool {
    if query.user_id.is_some_and(|id| id != product.user_id) {
        return false;
    }
    if query.condition.is_some_and(|c| c != product.condition) {
        return false;
    }
    if !query.show_empty_stock && product.stock <= 0 {
        return false;
    }
    if query.max_price.is_some_and(|max| product.price > max) {
        return false;
    }
    if query.min_price.is_some_and(|min| product.price < min) {
        return false;
    }
    if let Some(search) = &query.search {
        if !product.name.to_lowercase().contains(search.as_str()) {
            return false;
        }
    }

    let stored_tags = join_tags(&product.tags).to_lowercase();
    query.tags.iter().all(|tag| stored_tags.contains(tag.as_str()))
}

fn compare(a: &Product, b: &Product, query: &ProductQuery) -> Ordering {
    let ordering = match query.sort_by {
        SortBy::Date => a.created_at.cmp(&b.created_at),
        SortBy::Price => a.price.cmp(&b.price),
    }
    .then(a.id.cmp(&b.id));

    match query.order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, user_id: i64, product: NewProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id: store.next_id,
            name: product.name,
            price: product.price,
            image_url: product.image_url,
            stock: product.stock,
            condition: product.condition,
            tags: product.tags,
            is_purchasable: product.is_purchasable,
            purchase_count: 0,
            user_id,
            created_at: now,
            updated_at: now,
        };
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, user_id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self, query: &ProductQuery) -> ProductResult<(Vec<Product>, u64)> {
        let store = self.store.read().await;

        let mut found: Vec<&Product> = store
            .products
            .values()
            .filter(|p| matches(p, query))
            .collect();
        found.sort_by(|a, b| compare(a, b, query));

        let total = found.len() as u64;
        let page = found
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store.products.get_mut(&id).ok_or(ProductError::NotFound(id))?;

        product.name = changes.name;
        product.price = changes.price;
        product.image_url = changes.image_url;
        product.condition = changes.condition;
        product.tags = changes.tags;
        product.is_purchasable = changes.is_purchasable;
        product.updated_at = Utc::now();

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn update_stock(&self, id: i64, stock: i32) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store.products.get_mut(&id).ok_or(ProductError::NotFound(id))?;

        product.stock = stock;
        product.updated_at = Utc::now();

        tracing::info!(product_id = id, stock, "Updated product stock");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<Product> {
        let mut store = self.store.write().await;
        let product = store.products.remove(&id).ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = id, "Deleted product");
        Ok(product)
    }

    async fn purchase(&self, id: i64, quantity: i32) -> ProductResult<Product> {
        // The write guard plays the role of the row lock
        let mut store = self.store.write().await;
        let product = store.products.get_mut(&id).ok_or(ProductError::NotFound(id))?;

        if quantity > product.stock {
            return Err(ProductError::InsufficientStock {
                available: product.stock,
                requested: quantity,
            });
        }

        let purchase_count = product
            .purchase_count
            .checked_add(quantity)
            .ok_or(ProductError::PurchaseCountOverflow)?;

        product.stock -= quantity;
        product.purchase_count = purchase_count;
        product.updated_at = Utc::now();

        tracing::info!(product_id = id, quantity, stock = product.stock, "Purchased product");
        Ok(product.clone())
    }

    async fn total_sold_by_user(&self, user_id: i64) -> ProductResult<i64> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .filter(|p| p.user_id == user_id)
            .map(|p| i64::from(p.purchase_count))
            .sum())
    }
}
