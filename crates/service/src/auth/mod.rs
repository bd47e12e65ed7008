//! Auth module: token issuance for the configured operator account and the
//! access gate placed in front of the inventory routes.

pub mod domain;
pub mod errors;
pub mod gate;
pub mod service;

pub use gate::{AccessGate, JwtAccessGate, OpenAccessGate};
pub use service::AuthService;
