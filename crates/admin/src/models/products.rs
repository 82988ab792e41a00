//! Product (menu item) forms and counters for the products page.

use serde::Deserialize;

use foodia_core::models::{Category, MenuItem};
use foodia_core::{CategoryId, Money};

/// Message shown when a required product field is missing.
pub const MISSING_FIELDS: &str = "Please fill in all required fields";

/// Product form as posted from the add and edit screens.
#[derive(Debug, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image_url: String,
    /// Checkbox: present when ticked.
    pub is_customizable: Option<String>,
}

/// A validated product ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: Option<String>,
    pub is_customizable: bool,
}

/// A product form that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Please fill in all required fields")]
pub struct MissingFields;

impl ProductForm {
    /// Validate the form.
    ///
    /// Name, description, a category, and a price above zero are required.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] if any required field is blank or invalid.
    pub fn validate(&self) -> Result<ProductDraft, MissingFields> {
        let name = self.name.trim();
        let description = self.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(MissingFields);
        }
        let price = Money::parse(&self.price).map_err(|_| MissingFields)?;
        if !price.is_positive() {
            return Err(MissingFields);
        }
        let category_id: CategoryId = self.category_id.trim().parse().map_err(|_| MissingFields)?;

        Ok(ProductDraft {
            category_id,
            name: name.to_owned(),
            description: description.to_owned(),
            price,
            image_url: optional_text(&self.image_url),
            is_customizable: self.is_customizable.is_some(),
        })
    }
}

impl ProductForm {
    /// Validate an item edited inline in the store builder.
    ///
    /// Only the name and category are required there; a blank price means
    /// zero and the description may stay empty.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] if the name or category is missing or the
    /// price is not a non-negative amount.
    pub fn validate_builder_item(&self) -> Result<ProductDraft, MissingFields> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MissingFields);
        }
        let price = match self.price.trim() {
            "" => Money::ZERO,
            price => Money::parse(price).map_err(|_| MissingFields)?,
        };
        let category_id: CategoryId = self.category_id.trim().parse().map_err(|_| MissingFields)?;

        Ok(ProductDraft {
            category_id,
            name: name.to_owned(),
            description: self.description.trim().to_owned(),
            price,
            image_url: optional_text(&self.image_url),
            is_customizable: self.is_customizable.is_some(),
        })
    }
}

/// Trimmed text, or `None` when blank.
#[must_use]
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Raw query string of the products page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    #[serde(default)]
    pub category: String,
}

impl ProductsQuery {
    /// The selected category, `None` for "all" or anything unparseable.
    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.parse().ok()
    }
}

/// Counters shown above the product list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub categories: usize,
}

impl ProductStats {
    /// Count items by availability.
    #[must_use]
    pub fn new(items: &[MenuItem], categories: &[Category]) -> Self {
        let active = items.iter().filter(|item| item.is_active).count();
        Self {
            total: items.len(),
            active,
            inactive: items.len() - active,
            categories: categories.len(),
        }
    }
}
