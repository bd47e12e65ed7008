use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use models::product::{self, Entity as ProductEntity, NewProduct, ProductPatch};
use crate::errors::ServiceError;

/// List every product, lowest id first.
pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<product::Model>, ServiceError> {
    let rows = ProductEntity::find().order_by_asc(product::Column::Id).all(db).await?;
    Ok(rows)
}

/// Get a product by id.
pub async fn get_product(db: &DatabaseConnection, id: i32) -> Result<product::Model, ServiceError> {
    ProductEntity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("product"))
}

/// Insert a product; `product::create` validates the fields. A taken `sku` is
/// reported as `Conflict` whether it is caught by the lookup or by the unique
/// index on a concurrent insert.
pub async fn insert_product(db: &DatabaseConnection, input: NewProduct) -> Result<product::Model, ServiceError> {
    if product::find_by_sku(db, &input.sku).await?.is_some() {
        return Err(ServiceError::Conflict(format!("sku '{}' already exists", input.sku)));
    }
    Ok(product::create(db, input).await?)
}

/// Overwrite the fields present in `patch` and refresh `updated_at`.
pub async fn apply_update(db: &DatabaseConnection, id: i32, patch: ProductPatch) -> Result<product::Model, ServiceError> {
    patch.validate()?;
    let existing = get_product(db, id).await?;
    if let Some(sku) = patch.sku.as_deref() {
        let taken = ProductEntity::find()
            .filter(product::Column::Sku.eq(sku))
            .filter(product::Column::Id.ne(id))
            .one(db)
            .await?;
        if taken.is_some() {
            return Err(ServiceError::Conflict(format!("sku '{}' already exists", sku)));
        }
    }
    let mut am: product::ActiveModel = existing.into();
    patch.apply_to(&mut am);
    save_patched(db, am).await
}

/// A row deleted after the lookup surfaces as `RecordNotUpdated`; report it as
/// the missing product it is.
async fn save_patched(db: &DatabaseConnection, am: product::ActiveModel) -> Result<product::Model, ServiceError> {
    match am.update(db).await {
        Ok(updated) => Ok(updated),
        Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("product")),
        Err(e) => Err(e.into()),
    }
}

/// Hard delete.
pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = ProductEntity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("product"));
    }
    Ok(())
}
