//! Pieces shared by the inventory crates: wire types, logging setup and
//! runtime directory checks.

pub mod types;
pub mod utils;
pub mod env;
