//! Client Registry
//!
//! Email uniqueness is enforced by the `clients_email_key` constraint.
//! Registration reports a violation as `DuplicateEmail`; get-or-create
//! resolves it inside the insert with `ON CONFLICT`.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::domain::{Client, DomainError, Email, NewClient};
use crate::storage::{unique_violation, Storage, StorageError, StorageResult};

/// Outcome of resolving a client by email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientUpsert {
    pub client_id: Uuid,
    /// True when this call inserted the row
    pub created: bool,
}

/// Insert an email-only client, or return the existing client's ID.
///
/// One statement: concurrent callers with the same email all get the same
/// ID and only one row is ever written. Runs on the given connection so a
/// caller can include it in its own transaction.
pub async fn upsert_client_id(
    conn: &mut PgConnection,
    email: &Email,
) -> Result<ClientUpsert, sqlx::Error> {
    let (client_id, created): (Uuid, bool) = sqlx::query_as(
        r#"
        INSERT INTO clients (id, email)
        VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET email = EXCLUDED.email
        RETURNING id, (xmax = 0) AS created
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email.as_str())
    .fetch_one(conn)
    .await?;

    Ok(ClientUpsert { client_id, created })
}

/// Registry of clients
#[derive(Debug, Clone)]
pub struct ClientRegistry {
    storage: Storage,
}

impl ClientRegistry {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    // =========================================================================
    // register
    // =========================================================================

    /// Register a client with a full profile.
    ///
    /// The email is validated before any storage access. An email already
    /// known to the registry, including one created by a booking, is a
    /// `DuplicateEmail`.
    pub async fn register(&self, client: NewClient) -> StorageResult<Client> {
        let email = Email::parse(&client.email).map_err(DomainError::from)?;

        let client = self
            .storage
            .bounded("clients.register", self.insert(&email, &client))
            .await?;

        tracing::info!(client_id = %client.id, "Client registered");
        Ok(client)
    }

    async fn insert(&self, email: &Email, client: &NewClient) -> StorageResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, email, first_name, last_name, birthday)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, first_name, last_name, birthday
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email.as_str())
        .bind(client.first_name.trim())
        .bind(client.last_name.trim())
        .bind(client.birthday.trim())
        .fetch_one(self.storage.pool())
        .await
        .map_err(|e| {
            if unique_violation(&e) {
                StorageError::from(DomainError::DuplicateEmail(email.to_string()))
            } else {
                StorageError::from(e)
            }
        })
    }

    // =========================================================================
    // get_or_create_by_email
    // =========================================================================

    /// Resolve a client ID by email, creating an email-only client if needed
    pub async fn get_or_create_by_email(&self, email: &str) -> StorageResult<Uuid> {
        let email = Email::parse(email).map_err(DomainError::from)?;

        let upsert = self
            .storage
            .bounded("clients.get_or_create", self.upsert(&email))
            .await?;

        if upsert.created {
            tracing::info!(client_id = %upsert.client_id, "Client created from email");
        }
        Ok(upsert.client_id)
    }

    async fn upsert(&self, email: &Email) -> StorageResult<ClientUpsert> {
        let mut conn = self.storage.pool().acquire().await?;
        Ok(upsert_client_id(&mut conn, email).await?)
    }

    // =========================================================================
    // get_by_id
    // =========================================================================

    /// Get a client by ID
    pub async fn get_by_id(&self, id: Uuid) -> StorageResult<Client> {
        self.storage
            .bounded("clients.get", self.select_one(id))
            .await
    }

    async fn select_one(&self, id: Uuid) -> StorageResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, email, first_name, last_name, birthday FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.storage.pool())
        .await?;

        client.ok_or_else(|| DomainError::not_found("Client", id).into())
    }
}
