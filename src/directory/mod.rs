//! Session Directory module
//!
//! Read-only lookups over scheduled screenings and their tickets.

mod service;

pub use service::SessionDirectory;
