//! Domain module
//!
//! Core domain types and business rules.

pub mod context;
pub mod email;
pub mod error;
pub mod models;
pub mod slug;

pub use context::OperationContext;
pub use email::{Email, EmailError};
pub use error::DomainError;
pub use models::{Client, Movie, MovieChanges, NewClient, Session, Ticket};
pub use slug::{slugify, Slug, SlugError};
