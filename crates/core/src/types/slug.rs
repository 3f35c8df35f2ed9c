//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty (or slugifies to nothing).
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters other than lowercase alphanumerics and hyphens.
    #[error("slug may only contain lowercase letters, digits and hyphens")]
    InvalidCharacter,
}

/// A URL-safe identifier for categories and products.
///
/// Slugs are unique per table and appear in public URLs
/// (`/products/{slug}/`). [`Slug::parse`] accepts an already well-formed
/// slug; [`Slug::from_name`] derives one from a display name.
///
/// ## Examples
///
/// ```
/// use ebasi_core::Slug;
///
/// assert!(Slug::parse("silk-saree-2").is_ok());
/// assert!(Slug::parse("Silk Saree").is_err());
///
/// let slug = Slug::from_name("Silk Saree (Red)").unwrap();
/// assert_eq!(slug.as_str(), "silk-saree-red");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 200;

    /// Parse a `Slug` from an already-slugified string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, or contains
    /// characters other than `a-z`, `0-9` and `-`.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(SlugError::InvalidCharacter);
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a `Slug` from a display name.
    ///
    /// Lowercases, replaces runs of non-alphanumeric characters with a
    /// single hyphen, and trims leading/trailing hyphens.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if nothing slug-worthy remains, or
    /// [`SlugError::TooLong`] if the result exceeds [`Self::MAX_LENGTH`].
    pub fn from_name(name: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(name.len());
        let mut pending_hyphen = false;

        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c.to_ascii_lowercase());
            } else {
                pending_hyphen = true;
            }
        }

        Self::parse(&out)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Slug::parse("silk-saree").is_ok());
        assert!(Slug::parse("abc123").is_ok());
        assert!(Slug::parse("a-2-b").is_ok());
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
        assert!(matches!(
            Slug::parse("Silk Saree"),
            Err(SlugError::InvalidCharacter)
        ));
        assert!(matches!(
            Slug::parse("caf\u{e9}"),
            Err(SlugError::InvalidCharacter)
        ));
        let long = "a".repeat(201);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Slug::from_name("Silk Saree").unwrap().as_str(), "silk-saree");
        assert_eq!(
            Slug::from_name("  Silk   Saree (Red)! ").unwrap().as_str(),
            "silk-saree-red"
        );
        assert_eq!(Slug::from_name("A&B").unwrap().as_str(), "a-b");
    }

    #[test]
    fn test_from_name_empty() {
        assert!(matches!(Slug::from_name("!!!"), Err(SlugError::Empty)));
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::parse("silk-saree").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"silk-saree\"");
        let back: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slug);
    }
}
