//! Movie Catalog
//!
//! Slug uniqueness is enforced by the `movies` primary key: inserts and
//! title-changing updates are single statements, and a uniqueness violation
//! is reported as `DuplicateSlug`.

use crate::domain::{DomainError, Movie, MovieChanges, Slug};
use crate::storage::{unique_violation, Storage, StorageError, StorageResult};

/// Catalog of movies
#[derive(Debug, Clone)]
pub struct MovieCatalog {
    storage: Storage,
}

impl MovieCatalog {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    // =========================================================================
    // list
    // =========================================================================

    /// List every movie (empty when the catalog is empty)
    pub async fn list(&self) -> StorageResult<Vec<Movie>> {
        self.storage.bounded("movies.list", self.select_all()).await
    }

    async fn select_all(&self) -> StorageResult<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            "SELECT slug, title, synopsis FROM movies ORDER BY slug",
        )
        .fetch_all(self.storage.pool())
        .await?;

        Ok(movies)
    }

    // =========================================================================
    // create
    // =========================================================================

    /// Create a movie; its slug is derived from the title
    pub async fn create(&self, title: &str, synopsis: &str) -> StorageResult<Movie> {
        let title = title.trim();
        let slug = Slug::from_title(title).map_err(DomainError::from)?;

        let movie = self
            .storage
            .bounded("movies.create", self.insert(&slug, title, synopsis))
            .await?;

        tracing::info!(slug = %movie.slug, "Movie created");
        Ok(movie)
    }

    async fn insert(&self, slug: &Slug, title: &str, synopsis: &str) -> StorageResult<Movie> {
        sqlx::query_as::<_, Movie>(
            r#"
            INSERT INTO movies (slug, title, synopsis)
            VALUES ($1, $2, $3)
            RETURNING slug, title, synopsis
            "#,
        )
        .bind(slug.as_str())
        .bind(title)
        .bind(synopsis)
        .fetch_one(self.storage.pool())
        .await
        .map_err(|e| duplicate_slug_or(e, slug))
    }

    // =========================================================================
    // get
    // =========================================================================

    /// Get a movie by slug
    pub async fn get(&self, slug: &str) -> StorageResult<Movie> {
        self.storage.bounded("movies.get", self.select_one(slug)).await
    }

    async fn select_one(&self, slug: &str) -> StorageResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            "SELECT slug, title, synopsis FROM movies WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.storage.pool())
        .await?;

        movie.ok_or_else(|| DomainError::not_found("Movie", slug).into())
    }

    // =========================================================================
    // update
    // =========================================================================

    /// Apply a partial update.
    ///
    /// Only the supplied fields change. A new title moves the movie to the
    /// slug of that title, in the same statement. An empty change set is a
    /// plain read.
    pub async fn update(&self, slug: &str, changes: MovieChanges) -> StorageResult<Movie> {
        if changes.is_empty() {
            return self.get(slug).await;
        }

        let changes = MovieChanges {
            title: changes.title.map(|t| t.trim().to_string()),
            ..changes
        };
        let new_slug = changes
            .title
            .as_deref()
            .map(Slug::from_title)
            .transpose()
            .map_err(DomainError::from)?;

        let movie = self
            .storage
            .bounded(
                "movies.update",
                self.update_row(slug, new_slug.as_ref(), &changes),
            )
            .await?;

        if movie.slug != slug {
            tracing::info!(old_slug = %slug, new_slug = %movie.slug, "Movie renamed");
        } else {
            tracing::info!(slug = %movie.slug, "Movie updated");
        }
        Ok(movie)
    }

    async fn update_row(
        &self,
        slug: &str,
        new_slug: Option<&Slug>,
        changes: &MovieChanges,
    ) -> StorageResult<Movie> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            UPDATE movies
            SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                synopsis = COALESCE($4, synopsis)
            WHERE slug = $1
            RETURNING slug, title, synopsis
            "#,
        )
        .bind(slug)
        .bind(new_slug.map(Slug::as_str))
        .bind(changes.title.as_deref())
        .bind(changes.synopsis.as_deref())
        .fetch_optional(self.storage.pool())
        .await
        .map_err(|e| match new_slug {
            Some(new_slug) => duplicate_slug_or(e, new_slug),
            None => e.into(),
        })?;

        movie.ok_or_else(|| DomainError::not_found("Movie", slug).into())
    }

    // =========================================================================
    // delete
    // =========================================================================

    /// Delete a movie by slug
    pub async fn delete(&self, slug: &str) -> StorageResult<()> {
        self.storage
            .bounded("movies.delete", self.delete_row(slug))
            .await?;

        tracing::info!(slug, "Movie deleted");
        Ok(())
    }

    async fn delete_row(&self, slug: &str) -> StorageResult<()> {
        let rows_affected = sqlx::query("DELETE FROM movies WHERE slug = $1")
            .bind(slug)
            .execute(self.storage.pool())
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(DomainError::not_found("Movie", slug).into());
        }
        Ok(())
    }
}

fn duplicate_slug_or(err: sqlx::Error, slug: &Slug) -> StorageError {
    if unique_violation(&err) {
        DomainError::DuplicateSlug(slug.to_string()).into()
    } else {
        err.into()
    }
}
