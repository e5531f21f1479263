//! cinego Library
//!
//! Cinema booking backend: movie catalog, session directory, client
//! registry and ticket issuing over Postgres.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod directory;
pub mod domain;
mod error;
pub mod handlers;
pub mod registry;
pub mod storage;

pub use catalog::MovieCatalog;
pub use config::Config;
pub use directory::SessionDirectory;
pub use domain::{slugify, DomainError, Email, Slug};
pub use error::{AppError, AppResult};
pub use handlers::BookTicketHandler;
pub use registry::ClientRegistry;
pub use storage::{Storage, StorageError, StorageResult};
