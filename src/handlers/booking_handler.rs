//! Ticket Booking Handler
//!
//! Resolves (or creates) the client for an email and issues a ticket for a
//! session, in one transaction.

use sqlx::{PgConnection, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{DomainError, Email, OperationContext};
use crate::registry::upsert_client_id;
use crate::storage::{Storage, StorageError, StorageResult};

use super::{BookTicketCommand, BookTicketResult};

/// Handler for ticket bookings
#[derive(Debug, Clone)]
pub struct BookTicketHandler {
    storage: Storage,
}

impl BookTicketHandler {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Execute the book ticket command.
    ///
    /// The email is validated before any storage access. The session must
    /// exist. Client upsert and ticket insert commit together or not at all.
    pub async fn execute(
        &self,
        command: BookTicketCommand,
        context: &OperationContext,
    ) -> StorageResult<BookTicketResult> {
        if command.email.trim().is_empty() {
            return Err(DomainError::invalid_input("email is required").into());
        }
        let email = Email::parse(&command.email).map_err(DomainError::from)?;

        let result = self
            .storage
            .bounded("tickets.book", self.book(command.session_id, &email))
            .await
            .map_err(|err| {
                if err.is_storage_failure() {
                    tracing::warn!(
                        session_id = %command.session_id,
                        correlation_id = ?context.correlation_id,
                        error = %err,
                        "Booking failed in storage"
                    );
                }
                err
            })?;

        tracing::info!(
            ticket_id = %result.ticket_id,
            client_id = %result.client_id,
            session_id = %result.session_id,
            client_created = result.client_created,
            correlation_id = ?context.correlation_id,
            "Ticket booked"
        );

        Ok(result)
    }

    async fn book(&self, session_id: Uuid, email: &Email) -> StorageResult<BookTicketResult> {
        // Start transaction for consistency
        let mut tx = self.storage.pool().begin().await?;

        lock_session(&mut tx, session_id).await?;

        let client = upsert_client_id(&mut tx, email).await?;

        let ticket_id = Uuid::new_v4();
        insert_ticket(&mut tx, ticket_id, client.client_id, session_id).await?;

        tx.commit().await?;

        Ok(BookTicketResult {
            ticket_id,
            client_id: client.client_id,
            session_id,
            client_created: client.created,
        })
    }
}

/// Check the session exists and keep it from being deleted until commit
async fn lock_session(
    tx: &mut Transaction<'_, Postgres>,
    session_id: Uuid,
) -> StorageResult<()> {
    let session: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM sessions WHERE id = $1 FOR KEY SHARE")
            .bind(session_id)
            .fetch_optional(&mut **tx)
            .await?;

    match session {
        Some(_) => Ok(()),
        None => Err(DomainError::not_found("Session", session_id).into()),
    }
}

async fn insert_ticket(
    conn: &mut PgConnection,
    ticket_id: Uuid,
    client_id: Uuid,
    session_id: Uuid,
) -> StorageResult<()> {
    sqlx::query("INSERT INTO tickets (id, client_id, session_id) VALUES ($1, $2, $3)")
        .bind(ticket_id)
        .bind(client_id)
        .bind(session_id)
        .execute(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                StorageError::from(DomainError::not_found("Session", session_id))
            }
            e => e.into(),
        })?;

    Ok(())
}
