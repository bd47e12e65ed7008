use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::product::{self, NewProduct, ProductPatch};
use crate::errors::ServiceError;

/// Persistence seam for products. Every method touches at most one row.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<product::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<product::Model, ServiceError>;
    async fn insert(&self, input: NewProduct) -> Result<product::Model, ServiceError>;
    async fn apply_update(&self, id: i32, patch: ProductPatch) -> Result<product::Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed store implementation.
#[derive(Clone)]
pub struct SeaOrmInventoryStore {
    pub db: DatabaseConnection,
}

impl SeaOrmInventoryStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl InventoryStore for SeaOrmInventoryStore {
    async fn list_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        crate::db::product_store::list_products(&self.db).await
    }

    async fn get(&self, id: i32) -> Result<product::Model, ServiceError> {
        crate::db::product_store::get_product(&self.db, id).await
    }

    async fn insert(&self, input: NewProduct) -> Result<product::Model, ServiceError> {
        crate::db::product_store::insert_product(&self.db, input).await
    }

    async fn apply_update(&self, id: i32, patch: ProductPatch) -> Result<product::Model, ServiceError> {
        crate::db::product_store::apply_update(&self.db, id, patch).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        crate::db::product_store::delete_product(&self.db, id).await
    }
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    struct State {
        rows: BTreeMap<i32, product::Model>,
        next_id: i32,
    }

    pub struct InMemoryInventoryStore {
        state: Mutex<State>,
    }

    impl Default for InMemoryInventoryStore {
        fn default() -> Self {
            Self { state: Mutex::new(State { rows: BTreeMap::new(), next_id: 1 }) }
        }
    }

    impl InMemoryInventoryStore {
        fn lock(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn sku_taken(state: &State, sku: &str, except: Option<i32>) -> bool {
            state.rows.values().any(|p| p.sku == sku && Some(p.id) != except)
        }
    }

    #[async_trait]
    impl InventoryStore for InMemoryInventoryStore {
        async fn list_all(&self) -> Result<Vec<product::Model>, ServiceError> {
            Ok(self.lock().rows.values().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<product::Model, ServiceError> {
            self.lock().rows.get(&id).cloned().ok_or_else(|| ServiceError::not_found("product"))
        }

        async fn insert(&self, input: NewProduct) -> Result<product::Model, ServiceError> {
            input.validate()?;
            let mut state = self.lock();
            if Self::sku_taken(&state, &input.sku, None) {
                return Err(ServiceError::Conflict(format!("sku '{}' already exists", input.sku)));
            }
            let now: chrono::DateTime<chrono::FixedOffset> = Utc::now().into();
            let id = state.next_id;
            state.next_id += 1;
            let row = product::Model { id, name: input.name, sku: input.sku, stock: input.stock, created_at: now, updated_at: now };
            state.rows.insert(id, row.clone());
            Ok(row)
        }

        async fn apply_update(&self, id: i32, patch: ProductPatch) -> Result<product::Model, ServiceError> {
            patch.validate()?;
            let mut state = self.lock();
            if !state.rows.contains_key(&id) {
                return Err(ServiceError::not_found("product"));
            }
            if let Some(sku) = patch.sku.as_deref() {
                if Self::sku_taken(&state, sku, Some(id)) {
                    return Err(ServiceError::Conflict(format!("sku '{}' already exists", sku)));
                }
            }
            let row = state.rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("product"))?;
            if let Some(n) = patch.name { row.name = n; }
            if let Some(s) = patch.sku { row.sku = s; }
            if let Some(q) = patch.stock { row.stock = q; }
            row.updated_at = Utc::now().into();
            Ok(row.clone())
        }

        async fn delete(&self, id: i32) -> Result<(), ServiceError> {
            self.lock().rows.remove(&id).map(|_| ()).ok_or_else(|| ServiceError::not_found("product"))
        }
    }
}
