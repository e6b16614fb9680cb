use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product, ProductChanges, ProductCondition, join_tags, split_tags};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub stock: i32,
    pub condition: ProductCondition,
    /// Comma-joined
    pub tags: String,
    pub is_purchasable: bool,
    pub purchase_count: i32,
    pub user_id: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            image_url: model.image_url,
            stock: model.stock,
            condition: model.condition,
            tags: split_tags(&model.tags),
            is_purchasable: model.is_purchasable,
            purchase_count: model.purchase_count,
            user_id: model.user_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl ActiveModel {
    pub fn from_new(user_id: i64, product: NewProduct) -> Self {
        let now = chrono::Utc::now();
        Self {
            name: Set(product.name),
            price: Set(product.price),
            image_url: Set(product.image_url),
            stock: Set(product.stock),
            condition: Set(product.condition),
            tags: Set(join_tags(&product.tags)),
            is_purchasable: Set(product.is_purchasable),
            purchase_count: Set(0),
            user_id: Set(user_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
    }

    pub fn apply_changes(&mut self, changes: ProductChanges) {
        self.name = Set(changes.name);
        self.price = Set(changes.price);
        self.image_url = Set(changes.image_url);
        self.condition = Set(changes.condition);
        self.tags = Set(join_tags(&changes.tags));
        self.is_purchasable = Set(changes.is_purchasable);
        self.updated_at = Set(chrono::Utc::now().into());
    }
}
