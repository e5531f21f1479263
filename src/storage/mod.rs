//! Storage module
//!
//! The Postgres handle shared by every component, with a per-call deadline.

mod error;
mod handle;

pub use error::{unique_violation, StorageError, StorageResult};
pub use handle::Storage;
