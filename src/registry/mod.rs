//! Client Registry module
//!
//! Owns client rows, keyed by email.

mod repository;

pub use repository::{upsert_client_id, ClientRegistry, ClientUpsert};
