//! Email Addresses
//!
//! Validated, normalized client email addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,

    #[error("email must be at most {max} characters")]
    TooLong { max: usize },

    #[error("email must contain exactly one @ symbol")]
    InvalidAtSymbol,

    #[error("email local part is invalid")]
    InvalidLocalPart,

    #[error("email domain is invalid")]
    InvalidDomain,
}

/// A client email address.
///
/// Parsing trims surrounding whitespace and lower-cases the address, so two
/// spellings of the same mailbox map to one client. The accepted grammar is
/// the RFC 5322 dot-atom form without quoted local parts or address
/// literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an address (RFC 5321)
    pub const MAX_LENGTH: usize = 254;

    const MAX_LOCAL_LENGTH: usize = 64;
    const MAX_LABEL_LENGTH: usize = 63;

    pub fn parse(input: &str) -> Result<Self, EmailError> {
        let s = input.trim().to_lowercase();

        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let (local, domain) = match s.split_once('@') {
            Some((local, domain)) if !domain.contains('@') => (local, domain),
            _ => return Err(EmailError::InvalidAtSymbol),
        };

        if !Self::is_valid_local(local) {
            return Err(EmailError::InvalidLocalPart);
        }
        if !Self::is_valid_domain(domain) {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s))
    }

    fn is_valid_local(local: &str) -> bool {
        if local.is_empty() || local.len() > Self::MAX_LOCAL_LENGTH {
            return false;
        }
        // dot-atom: atoms of atext separated by single dots
        local.split('.').all(|atom| {
            !atom.is_empty()
                && atom.chars().all(|c| {
                    c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-".contains(c)
                })
        })
    }

    fn is_valid_domain(domain: &str) -> bool {
        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return false;
        }
        labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= Self::MAX_LABEL_LENGTH
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("a@b.com").is_ok());
        assert!(Email::parse("user.name@example.com").is_ok());
        assert!(Email::parse("user+tag@sub.example.co.uk").is_ok());
        assert!(Email::parse("o'brien@example.ie").is_ok());
        assert!(Email::parse("x-y_z@my-host.example").is_ok());
    }

    #[test]
    fn test_parse_normalizes() {
        let email = Email::parse("  New@Client.COM ").unwrap();
        assert_eq!(email.as_str(), "new@client.com");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(Email::parse(""), Err(EmailError::Empty));
        assert_eq!(Email::parse("   "), Err(EmailError::Empty));
        assert_eq!(Email::parse("not-an-email"), Err(EmailError::InvalidAtSymbol));
        assert_eq!(Email::parse("a@b@c.com"), Err(EmailError::InvalidAtSymbol));
        assert_eq!(Email::parse("@example.com"), Err(EmailError::InvalidLocalPart));
        assert_eq!(Email::parse(".a@example.com"), Err(EmailError::InvalidLocalPart));
        assert_eq!(Email::parse("a..b@example.com"), Err(EmailError::InvalidLocalPart));
        assert_eq!(Email::parse("a b@example.com"), Err(EmailError::InvalidLocalPart));
        assert_eq!(Email::parse("user@"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@localhost"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@-bad.com"), Err(EmailError::InvalidDomain));
        assert_eq!(Email::parse("user@bad..com"), Err(EmailError::InvalidDomain));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(Email::parse(&long), Err(EmailError::TooLong { .. })));

        let long_local = format!("{}@example.com", "a".repeat(65));
        assert_eq!(Email::parse(&long_local), Err(EmailError::InvalidLocalPart));
    }

    #[test]
    fn test_deserialize_validates() {
        let email: Email = serde_json::from_str("\"Ana@Example.com\"").unwrap();
        assert_eq!(email.as_str(), "ana@example.com");

        assert!(serde_json::from_str::<Email>("\"nope\"").is_err());
    }
}
