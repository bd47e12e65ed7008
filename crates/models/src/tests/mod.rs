//! Entity-level CRUD against a migrated in-memory database.
use crate::db::{connect_with_config, DatabaseConfig};
use crate::errors::ModelError;
use crate::product::{self, NewProduct, ProductPatch};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use migration::MigratorTrait;
use anyhow::Result;

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect_with_config(&DatabaseConfig::sqlite_in_memory()).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn new_product(sku: &str) -> NewProduct {
    NewProduct { name: "Widget".into(), sku: sku.into(), stock: 10 }
}

#[tokio::test]
async fn create_assigns_id_and_timestamps() -> Result<()> {
    let db = setup_test_db().await?;

    let created = product::create(&db, new_product("SKU-1")).await?;
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Widget");
    assert_eq!(created.stock, 10);
    assert_eq!(created.created_at, created.updated_at);

    let found = product::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found, Some(created));
    Ok(())
}

#[tokio::test]
async fn duplicate_sku_is_a_conflict() -> Result<()> {
    let db = setup_test_db().await?;

    let first = product::create(&db, new_product("DUP")).await?;
    let err = product::create(&db, NewProduct { name: "Other".into(), ..new_product("DUP") }).await.unwrap_err();
    assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");

    let still = product::Entity::find_by_id(first.id).one(&db).await?.unwrap();
    assert_eq!(still.name, "Widget");
    Ok(())
}

#[tokio::test]
async fn invalid_input_never_reaches_the_table() -> Result<()> {
    let db = setup_test_db().await?;

    let err = product::create(&db, NewProduct { stock: -4, ..new_product("NEG") }).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert!(product::Entity::find().all(&db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() -> Result<()> {
    let db = setup_test_db().await?;

    let a = product::create(&db, new_product("A")).await?;
    let b = product::create(&db, new_product("B")).await?;
    product::Entity::delete_by_id(b.id).exec(&db).await?;
    let c = product::create(&db, new_product("C")).await?;

    assert!(c.id > b.id && b.id > a.id);
    Ok(())
}

#[tokio::test]
async fn patch_updates_present_fields_and_refreshes_updated_at() -> Result<()> {
    let db = setup_test_db().await?;

    let created = product::create(&db, new_product("PATCH")).await?;
    let mut am: product::ActiveModel = created.clone().into();
    ProductPatch { stock: Some(5), ..Default::default() }.apply_to(&mut am);
    let updated = am.update(&db).await?;

    assert_eq!(updated.stock, 5);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.sku, created.sku);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= updated.created_at);
    Ok(())
}

#[tokio::test]
async fn find_by_sku_matches_exactly() -> Result<()> {
    let db = setup_test_db().await?;

    let created = product::create(&db, new_product("FIND-ME")).await?;
    assert_eq!(product::find_by_sku(&db, "FIND-ME").await?.map(|p| p.id), Some(created.id));
    assert!(product::find_by_sku(&db, "find-me-not").await?.is_none());
    Ok(())
}
