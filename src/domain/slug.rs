//! Movie Slugs
//!
//! URL-safe identifiers derived from movie titles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors produced when deriving a [`Slug`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlugError {
    #[error("title must contain at least one letter or digit")]
    Empty,
}

/// Turn free text into a URL-safe identifier.
///
/// The title is lower-cased first, then every run of characters outside
/// `[a-z0-9]` collapses into a single `-`, and dashes at either end are
/// dropped. The result may be empty; use [`Slug::from_title`] when an empty
/// slug must be rejected.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_dash = false;

    for c in lowered.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// A non-empty slug, the identity of a movie
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derive the slug for a movie title
    pub fn from_title(title: &str) -> Result<Self, SlugError> {
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(SlugError::Empty);
        }
        Ok(Self(slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Inception 2!!"), "inception-2");
        assert_eq!(slugify("The Lord of the Rings"), "the-lord-of-the-rings");
        assert_eq!(slugify("Dune"), "dune");
    }

    #[test]
    fn test_slugify_collapses_and_trims() {
        assert_eq!(slugify("  --Mad   Max: Fury Road--  "), "mad-max-fury-road");
        assert_eq!(slugify("Amélie"), "am-lie");
        assert_eq!(slugify("WALL·E"), "wall-e");
    }

    #[test]
    fn test_slugify_lowercases_before_filtering() {
        // Characters whose lowercase form is ASCII survive
        assert_eq!(slugify("İstanbul"), "i-stanbul");
        assert_eq!(slugify("\u{212A}ill Bill"), "kill-bill");
        assert_eq!(slugify("ΣΟΦΙΑ"), "");
    }

    #[test]
    fn test_slugify_empty_inputs() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let titles = [
            "Inception 2!!",
            "  Spaces  everywhere ",
            "Star Wars: Episode IV - A New Hope",
            "2001: A Space Odyssey",
            "¡¿Qué?!",
            "",
        ];

        for title in titles {
            let once = slugify(title);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", title);
            assert_eq!(once, once.to_lowercase());
        }
    }

    #[test]
    fn test_slug_from_title_rejects_empty() {
        assert_eq!(Slug::from_title("?!"), Err(SlugError::Empty));
        assert_eq!(Slug::from_title("Alien").unwrap().as_str(), "alien");
    }
}
