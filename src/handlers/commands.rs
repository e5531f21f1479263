//! Command definitions
//!
//! Commands represent intentions to change the system state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// BookTicketCommand
// =========================================================================

/// Command to book a ticket for a session on behalf of an email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTicketCommand {
    pub session_id: Uuid,
    /// Raw email as submitted; validated by the handler
    pub email: String,
}

impl BookTicketCommand {
    pub fn new(session_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            session_id,
            email: email.into(),
        }
    }
}

/// Result of a successful booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTicketResult {
    pub ticket_id: Uuid,
    pub client_id: Uuid,
    pub session_id: Uuid,
    /// True when the booking created the client
    pub client_created: bool,
}
