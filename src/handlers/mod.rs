//! Command Handlers module
//!
//! Handlers that orchestrate multi-step writes across components.

mod booking_handler;
mod commands;

#[cfg(test)]
mod tests;

pub use booking_handler::BookTicketHandler;
pub use commands::*;
