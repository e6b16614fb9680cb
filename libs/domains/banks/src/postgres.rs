use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{BankError, BankResult},
    models::{BankAccount, BankAccountInput},
    repository::BankRepository,
};

/// PostgreSQL implementation of BankRepository
#[derive(Clone)]
pub struct PgBankRepository {
    db: DatabaseConnection,
}

impl PgBankRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BankRepository for PgBankRepository {
    async fn create(&self, user_id: i64, input: BankAccountInput) -> BankResult<BankAccount> {
        let model = entity::ActiveModel::from_input(user_id, input)
            .insert(&self.db)
            .await?;

        tracing::info!(bank_account_id = model.id, user_id, "Created bank account");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> BankResult<Option<BankAccount>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list_by_user(&self, user_id: i64) -> BankResult<Vec<BankAccount>> {
        let models = entity::Entity::find()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, input: BankAccountInput) -> BankResult<BankAccount> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BankError::NotFound(id))?;

        let mut active_model = model.into_active_model();
        active_model.apply_input(input);

        let updated = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => BankError::NotFound(id),
            other => BankError::Database(other),
        })?;

        tracing::info!(bank_account_id = id, "Updated bank account");
        Ok(updated.into())
    }

    async fn delete(&self, id: i64) -> BankResult<BankAccount> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(BankError::NotFound(id))?;

        let result = model.clone().delete(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(BankError::NotFound(id));
        }

        tracing::info!(bank_account_id = id, "Deleted bank account");
        Ok(model.into())
    }
}
