//! Movie Catalog module
//!
//! Owns movie rows, keyed by the slug of their title.

mod repository;

pub use repository::MovieCatalog;
