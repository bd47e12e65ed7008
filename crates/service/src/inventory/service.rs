use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::inventory::domain::{self, ProductRecord};
use crate::inventory::repository::InventoryStore;

/// Stateless façade between transport input and the store. Holds only the
/// injected store handle.
pub struct InventoryService<R: InventoryStore> {
    store: Arc<R>,
}

impl<R: InventoryStore> InventoryService<R> {
    pub fn new(store: Arc<R>) -> Self { Self { store } }

    /// Every product as a response record.
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<ProductRecord>, ServiceError> {
        let rows = self.store.list_all().await?;
        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<ProductRecord, ServiceError> {
        Ok(self.store.get(id).await?.into())
    }

    /// Create a product from a loosely typed body.
    ///
    /// # Examples
    /// ```
    /// use service::inventory::{InventoryService, repository::mock::InMemoryInventoryStore};
    /// use std::sync::Arc;
    /// let svc = InventoryService::new(Arc::new(InMemoryInventoryStore::default()));
    /// let body = serde_json::json!({"name": "Widget", "sku": "SKU-1", "stock": 10});
    /// let created = tokio_test::block_on(svc.create(&body)).unwrap();
    /// assert_eq!(created.id, 1);
    /// assert!(tokio_test::block_on(svc.create(&body)).is_err());
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &Value) -> Result<ProductRecord, ServiceError> {
        let new = domain::parse_new_product(input)?;
        let created = self.store.insert(new).await?;
        info!(id = created.id, sku = %created.sku, "product_created");
        Ok(created.into())
    }

    /// Apply an allow-listed partial update. `id` and the timestamps cannot
    /// be set through here.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: &Value) -> Result<ProductRecord, ServiceError> {
        let patch = domain::parse_patch(input)?;
        let updated = self.store.apply_update(id, patch).await?;
        info!(id = updated.id, "product_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        info!(id, "product_deleted");
        Ok(())
    }
}
