use sea_orm::{entity::prelude::*, Set, NotSet, DatabaseConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const NAME_MAX_LEN: usize = 100;
pub const SKU_MAX_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub sku: String,
    pub stock: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation { fn def(&self) -> RelationDef { panic!("no relations") } }

impl ActiveModelBehavior for ActiveModel {}

/// Fields a caller may supply when creating a product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub stock: i32,
}

/// Allow-listed mutable fields. `None` leaves the column untouched; `id` and
/// the timestamps are not representable here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub stock: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.sku.is_none() && self.stock.is_none()
    }

    pub fn validate(&self) -> Result<(), errors::ModelError> {
        if let Some(n) = &self.name { validate_name(n)?; }
        if let Some(s) = &self.sku { validate_sku(s)?; }
        if let Some(q) = self.stock { validate_stock(q)?; }
        Ok(())
    }

    /// Copy the present fields onto `am` and bump `updated_at`.
    pub fn apply_to(self, am: &mut ActiveModel) {
        if let Some(n) = self.name { am.name = Set(n); }
        if let Some(s) = self.sku { am.sku = Set(s); }
        if let Some(q) = self.stock { am.stock = Set(q); }
        am.updated_at = Set(Utc::now().into());
    }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name longer than {} characters", NAME_MAX_LEN)));
    }
    Ok(())
}

pub fn validate_sku(sku: &str) -> Result<(), errors::ModelError> {
    if sku.trim().is_empty() {
        return Err(errors::ModelError::Validation("sku required".into()));
    }
    if sku.chars().count() > SKU_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("sku longer than {} characters", SKU_MAX_LEN)));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), errors::ModelError> {
    if stock < 0 {
        return Err(errors::ModelError::Validation("stock must be >= 0".into()));
    }
    Ok(())
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        validate_name(&self.name)?;
        validate_sku(&self.sku)?;
        validate_stock(self.stock)
    }
}

/// Insert a product; the store assigns `id`, both timestamps start equal.
pub async fn create(db: &DatabaseConnection, input: NewProduct) -> Result<Model, errors::ModelError> {
    input.validate()?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: NotSet,
        name: Set(input.name),
        sku: Set(input.sku),
        stock: Set(input.stock),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_sku(db: &DatabaseConnection, sku: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Sku.eq(sku)).one(db).await?)
}
