//! Service layer for the inventory API.
//! - `inventory`: the Inventory Store seam and the Inventory Service on top of it.
//! - `db`: SeaORM queries backing the store.
//! - `auth`: token issuance and the pluggable access gate.

pub mod errors;
pub mod auth;
pub mod db;
pub mod inventory;
#[cfg(test)]
pub mod test_support;
