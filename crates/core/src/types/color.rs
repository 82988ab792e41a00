//! Store theme colors.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Not `#rgb` or `#rrggbb`.
    #[error("'{0}' is not a hex color like #22c55e")]
    Invalid(String),
}

/// A CSS hex color in `#rrggbb` form.
///
/// Three-digit shorthand is expanded on parse so templates can rely on one
/// format.
///
/// ```
/// use foodia_core::HexColor;
///
/// assert_eq!(HexColor::parse("#FA0").unwrap().as_str(), "#ffaa00");
/// assert!(HexColor::parse("green").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Default primary color for new stores.
    pub const DEFAULT_PRIMARY: &'static str = "#22c55e";
    /// Default button color for new stores.
    pub const DEFAULT_BUTTON: &'static str = "#eab308";

    /// Parse a `#rgb` or `#rrggbb` color.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::Invalid`] for anything else.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::Invalid(input.to_owned());
        let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let expanded = match digits.len() {
            6 => digits.to_ascii_lowercase(),
            3 => digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_lowercase(),
            _ => return Err(invalid()),
        };
        Ok(Self(format!("#{expanded}")))
    }

    /// Returns the color as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(
            HexColor::parse(HexColor::DEFAULT_PRIMARY).unwrap().as_str(),
            "#22c55e"
        );
        assert!(HexColor::parse(HexColor::DEFAULT_BUTTON).is_ok());
    }

    #[test]
    fn test_rejects_bad_input() {
        for input in ["22c55e", "#22c55", "#ggg", "", "#"] {
            assert!(HexColor::parse(input).is_err(), "{input}");
        }
    }
}
