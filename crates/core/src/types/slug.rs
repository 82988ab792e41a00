//! Public store URL slug.
//!
//! Customers reach a published store at `/order?store=<slug>`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StoreSlug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input is empty.
    #[error("store URL cannot be empty")]
    Empty,
    /// The input is longer than [`StoreSlug::MAX_LENGTH`].
    #[error("store URL must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains characters other than `a-z`, `0-9`, and `-`.
    #[error("store URL may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacters,
    /// The input starts or ends with a hyphen.
    #[error("store URL cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A validated store slug: lowercase ASCII letters, digits, and single
/// interior hyphens.
///
/// ```
/// use foodia_core::StoreSlug;
///
/// assert_eq!(StoreSlug::slugify("Café do João!").unwrap().as_str(), "caf-do-jo-o");
/// assert!(StoreSlug::parse("pizza-place").is_ok());
/// assert!(StoreSlug::parse("Pizza Place").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct StoreSlug(String);

impl StoreSlug {
    /// Maximum slug length.
    pub const MAX_LENGTH: usize = 60;

    /// Validate a slug exactly as given (after trimming).
    ///
    /// # Errors
    ///
    /// Returns an error describing the first rule the input breaks.
    pub fn parse(input: &str) -> Result<Self, SlugError> {
        let s = input.trim();
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
            return Err(SlugError::InvalidCharacters);
        }
        if s.starts_with('-') || s.ends_with('-') {
            return Err(SlugError::EdgeHyphen);
        }
        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from a free-form store name.
    ///
    /// Runs of anything that is not an ASCII letter or digit collapse into a
    /// single hyphen. Returns `None` when nothing usable remains.
    #[must_use]
    pub fn slugify(name: &str) -> Option<Self> {
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
            if out.len() >= Self::MAX_LENGTH {
                break;
            }
        }
        out.truncate(Self::MAX_LENGTH);
        let trimmed = out.trim_end_matches('-');
        Self::parse(trimmed).ok()
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StoreSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
