//! Inventory module: domain translation, store seam, service façade.

pub mod domain;
pub mod repository;
pub mod service;

pub use repository::{InventoryStore, SeaOrmInventoryStore};
pub use service::InventoryService;
