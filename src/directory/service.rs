//! Session Directory Service
//!
//! Queries over the `sessions` and `tickets` tables. Nothing here writes.

use uuid::Uuid;

use crate::domain::{DomainError, Session, Ticket};
use crate::storage::{Storage, StorageResult};

/// Directory of scheduled sessions
#[derive(Debug, Clone)]
pub struct SessionDirectory {
    storage: Storage,
}

impl SessionDirectory {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Find sessions whose movie slug contains `movie_query`.
    ///
    /// Matching is case-insensitive and literal (`%` and `_` match
    /// themselves). An empty query matches every session.
    pub async fn search(&self, movie_query: &str) -> StorageResult<Vec<Session>> {
        let pattern = like_pattern(movie_query);
        self.storage
            .bounded("sessions.search", self.select_matching(&pattern))
            .await
    }

    async fn select_matching(&self, pattern: &str) -> StorageResult<Vec<Session>> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, starts_at, movie_slug, room
            FROM sessions
            WHERE movie_slug ILIKE $1 ESCAPE '\'
            ORDER BY starts_at
            "#,
        )
        .bind(pattern)
        .fetch_all(self.storage.pool())
        .await?;

        Ok(sessions)
    }

    /// Get a session by ID
    pub async fn get_by_id(&self, id: Uuid) -> StorageResult<Session> {
        self.storage
            .bounded("sessions.get", self.select_one(id))
            .await
    }

    async fn select_one(&self, id: Uuid) -> StorageResult<Session> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, starts_at, movie_slug, room FROM sessions WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.storage.pool())
        .await?;

        session.ok_or_else(|| DomainError::not_found("Session", id).into())
    }

    /// List the tickets issued for a session, in no particular order
    pub async fn list_tickets(&self, id: Uuid) -> StorageResult<Vec<Ticket>> {
        self.storage
            .bounded("sessions.tickets", self.select_tickets(id))
            .await
    }

    async fn select_tickets(&self, id: Uuid) -> StorageResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(
            "SELECT id, client_id, session_id FROM tickets WHERE session_id = $1",
        )
        .bind(id)
        .fetch_all(self.storage.pool())
        .await?;

        Ok(tickets)
    }
}

/// Build a substring `LIKE` pattern that treats the query literally
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_query() {
        assert_eq!(like_pattern("dune"), "%dune%");
        assert_eq!(like_pattern("  dune "), "%dune%");
    }

    #[test]
    fn test_like_pattern_empty_matches_all() {
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("   "), "%%");
    }

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("back\\slash"), "%back\\\\slash%");
    }
}
