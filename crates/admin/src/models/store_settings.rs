//! Store configuration forms from the builder and the settings page.

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use foodia_core::{ColorError, HexColor, Language, SlugError, StoreSlug, UnknownVariant};

use super::products::optional_text;

/// Why a store form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreFormError {
    #[error("Store name is required")]
    MissingName,
    #[error("{0}")]
    Color(#[from] ColorError),
    #[error("{0}")]
    Slug(#[from] SlugError),
    #[error("{0}")]
    Language(#[from] UnknownVariant),
    #[error("{0} must be an http or https link")]
    ImageLink(&'static str),
}

/// Blank means no image; anything else must be an absolute http(s) URL.
fn optional_link(field: &'static str, value: &str) -> Result<Option<String>, StoreFormError> {
    let Some(text) = optional_text(value) else {
        return Ok(None);
    };
    match Url::parse(&text) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Some(url.into())),
        _ => Err(StoreFormError::ImageLink(field)),
    }
}

/// Store identity form in the builder.
#[derive(Debug, Default, Deserialize)]
pub struct StoreConfigForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub banner_url: String,
    #[serde(default)]
    pub primary_color: String,
    #[serde(default)]
    pub button_color: String,
    #[serde(default)]
    pub language: String,
    /// Checkbox: present when ticked.
    pub gamified_ordering: Option<String>,
    /// Blank keeps the current link.
    #[serde(default)]
    pub store_url: String,
}

/// Validated store identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub primary_color: HexColor,
    pub button_color: HexColor,
    pub language: Language,
    pub gamified_ordering: bool,
    pub store_url: Option<StoreSlug>,
}

impl StoreConfigForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreFormError`] for a blank name, a malformed color, an
    /// unsupported language, a non-http image link, or an invalid store link.
    pub fn validate(&self) -> Result<StoreConfig, StoreFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StoreFormError::MissingName);
        }
        let store_url = match self.store_url.trim() {
            "" => None,
            slug => Some(StoreSlug::parse(&slug.to_lowercase())?),
        };

        Ok(StoreConfig {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            logo_url: optional_link("Logo URL", &self.logo_url)?,
            banner_url: optional_link("Banner URL", &self.banner_url)?,
            primary_color: HexColor::parse(&self.primary_color)?,
            button_color: HexColor::parse(&self.button_color)?,
            language: self.language.parse()?,
            gamified_ordering: self.gamified_ordering.is_some(),
            store_url,
        })
    }
}

/// Business information form on the settings page.
#[derive(Debug, Default, Deserialize)]
pub struct BusinessForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
}

/// Validated business information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessInfo {
    pub name: String,
    pub description: String,
    pub language: Language,
}

impl BusinessForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreFormError`] for a blank name or unsupported language.
    pub fn validate(&self) -> Result<BusinessInfo, StoreFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StoreFormError::MissingName);
        }
        Ok(BusinessInfo {
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            language: self.language.parse()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> StoreConfigForm {
        StoreConfigForm {
            name: " Sabor Brasileiro ".to_owned(),
            description: "Authentic Brazilian food".to_owned(),
            logo_url: String::new(),
            banner_url: "https://img.example/banner.jpg".to_owned(),
            primary_color: "#22C55E".to_owned(),
            button_color: "#fa0".to_owned(),
            language: "pt".to_owned(),
            gamified_ordering: Some("on".to_owned()),
            store_url: String::new(),
        }
    }

    #[test]
    fn test_store_config_normalizes_fields() {
        let config = form().validate().unwrap();
        assert_eq!(config.name, "Sabor Brasileiro");
        assert_eq!(config.logo_url, None);
        assert_eq!(config.banner_url.as_deref(), Some("https://img.example/banner.jpg"));
        assert_eq!(config.primary_color.as_str(), "#22c55e");
        assert_eq!(config.button_color.as_str(), "#ffaa00");
        assert_eq!(config.language, Language::Pt);
        assert!(config.gamified_ordering);
        assert_eq!(config.store_url, None);
    }

    #[test]
    fn test_store_config_rejects_bad_input() {
        let mut blank = form();
        blank.name = "  ".to_owned();
        assert_eq!(blank.validate(), Err(StoreFormError::MissingName));

        let mut color = form();
        color.primary_color = "green".to_owned();
        assert!(matches!(color.validate(), Err(StoreFormError::Color(_))));

        let mut slug = form();
        slug.store_url = "-sabor".to_owned();
        assert!(matches!(slug.validate(), Err(StoreFormError::Slug(_))));

        let mut language = form();
        language.language = "fr".to_owned();
        assert!(matches!(language.validate(), Err(StoreFormError::Language(_))));
    }

    #[test]
    fn test_image_links_must_be_http() {
        let mut script = form();
        script.logo_url = "javascript:alert(1)".to_owned();
        assert_eq!(script.validate(), Err(StoreFormError::ImageLink("Logo URL")));

        let mut relative = form();
        relative.banner_url = "banner.jpg".to_owned();
        assert_eq!(
            relative.validate().unwrap_err().to_string(),
            "Banner URL must be an http or https link"
        );

        let mut plain = form();
        plain.logo_url = " http://img.example/logo.png ".to_owned();
        assert_eq!(
            plain.validate().unwrap().logo_url.as_deref(),
            Some("http://img.example/logo.png")
        );
    }

    #[test]
    fn test_store_link_is_lowercased() {
        let mut custom = form();
        custom.store_url = "Sabor-Brasileiro".to_owned();
        assert_eq!(
            custom.validate().unwrap().store_url.map(|s| s.to_string()),
            Some("sabor-brasileiro".to_owned())
        );
    }

    #[test]
    fn test_business_form() {
        let info = BusinessForm {
            name: "Cantina".to_owned(),
            description: String::new(),
            language: "es".to_owned(),
        }
        .validate()
        .unwrap();
        assert_eq!(info.language, Language::Es);

        assert!(BusinessForm::default().validate().is_err());
    }
}
