use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel, ModelTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Statement, TransactionTrait,
    sea_query::Expr,
};

use crate::{
    entity::{self, Column, Entity},
    error::{ProductError, ProductResult},
    models::{NewProduct, Product, ProductChanges, ProductQuery, SortBy, SortOrder},
    repository::ProductRepository,
};

/// PostgreSQL implementation of ProductRepository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> ProductResult<entity::Model> {
        Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

#[derive(Debug, FromQueryResult)]
struct SoldTotal {
    total: i64,
}

fn not_updated(id: i64) -> impl FnOnce(DbErr) -> ProductError {
    move |e| match e {
        DbErr::RecordNotUpdated => ProductError::NotFound(id),
        other => ProductError::Database(other),
    }
}

/// `%term%` with the LIKE wildcards in `term` taken literally (escape char `!`)
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '!' | '%' | '_') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn filtered(query: &ProductQuery) -> Select<Entity> {
    let mut select = Entity::find();

    if let Some(user_id) = query.user_id {
        select = select.filter(Column::UserId.eq(user_id));
    }
    if let Some(condition) = query.condition {
        select = select.filter(Column::Condition.eq(condition));
    }
    if !query.show_empty_stock {
        select = select.filter(Column::Stock.gt(0));
    }
    if let Some(max_price) = query.max_price {
        select = select.filter(Column::Price.lte(max_price));
    }
    if let Some(min_price) = query.min_price {
        select = select.filter(Column::Price.gte(min_price));
    }
    if let Some(search) = &query.search {
        select = select.filter(Expr::cust_with_values(
            "LOWER(name) LIKE ? ESCAPE '!'",
            [contains_pattern(search)],
        ));
    }
    for tag in &query.tags {
        select = select.filter(Expr::cust_with_values(
            "LOWER(tags) LIKE ? ESCAPE '!'",
            [contains_pattern(tag)],
        ));
    }

    select
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, user_id: i64, product: NewProduct) -> ProductResult<Product> {
        let model = entity::ActiveModel::from_new(user_id, product)
            .insert(&self.db)
            .await?;

        tracing::info!(product_id = model.id, user_id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, query: &ProductQuery) -> ProductResult<(Vec<Product>, u64)> {
        let total = filtered(query).count(&self.db).await?;

        let column = match query.sort_by {
            SortBy::Date => Column::CreatedAt,
            SortBy::Price => Column::Price,
        };
        let order = match query.order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let models = filtered(query)
            .order_by(column, order.clone())
            .order_by(Column::Id, order)
            .limit(query.limit)
            .offset(query.offset)
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn update(&self, id: i64, changes: ProductChanges) -> ProductResult<Product> {
        let mut active_model = self.find_model(id).await?.into_active_model();
        active_model.apply_changes(changes);

        let updated = active_model.update(&self.db).await.map_err(not_updated(id))?;

        tracing::info!(product_id = id, "Updated product");
        Ok(updated.into())
    }

    async fn update_stock(&self, id: i64, stock: i32) -> ProductResult<Product> {
        let mut active_model = self.find_model(id).await?.into_active_model();
        active_model.stock = Set(stock);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model.update(&self.db).await.map_err(not_updated(id))?;

        tracing::info!(product_id = id, stock, "Updated product stock");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<Product> {
        let model = self.find_model(id).await?;

        let result = model.clone().delete(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = id, "Deleted product");
        Ok(model.into())
    }

    async fn purchase(&self, id: i64, quantity: i32) -> ProductResult<Product> {
        let txn = self.db.begin().await?;

        // SELECT ... FOR UPDATE; concurrent buyers queue on the row lock
        let model = Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if quantity > model.stock {
            txn.rollback().await?;
            tracing::info!(product_id = id, stock = model.stock, quantity, "Insufficient stock");
            return Err(ProductError::InsufficientStock {
                available: model.stock,
                requested: quantity,
            });
        }

        let Some(purchase_count) = model.purchase_count.checked_add(quantity) else {
            txn.rollback().await?;
            return Err(ProductError::PurchaseCountOverflow);
        };
        let stock = model.stock - quantity;

        let mut active_model = model.into_active_model();
        active_model.stock = Set(stock);
        active_model.purchase_count = Set(purchase_count);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(product_id = id, quantity, stock, "Purchased product");
        Ok(updated.into())
    }

    async fn total_sold_by_user(&self, user_id: i64) -> ProductResult<i64> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            SELECT COALESCE(SUM(purchase_count), 0)::BIGINT AS total
            FROM products
            WHERE user_id = $1
            "#,
            [user_id.into()],
        );

        let row = SoldTotal::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(|r| r.total).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("bike"), "%bike%");
        assert_eq!(contains_pattern("a_c"), "%a!_c%");
        assert_eq!(contains_pattern("100%"), "%100!%%");
        assert_eq!(contains_pattern("wow!"), "%wow!!%");
    }
}
