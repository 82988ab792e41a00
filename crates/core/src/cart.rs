//! Customer cart.
//!
//! A cart is a list of lines. Adding an item whose chosen options match an
//! existing line bumps that line's quantity instead of appending a duplicate.
//! Option order never matters: selections are kept sorted by option id.

use serde::{Deserialize, Serialize};

use crate::models::{CustomOption, MenuItem};
use crate::types::{CustomOptionId, MenuItemId, Money};

/// Points needed per reward level.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Most units a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// Errors from cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The item is switched off in the store builder.
    #[error("{0} is currently unavailable")]
    Unavailable(String),
    /// A submitted option id does not belong to the item.
    #[error("option {0} is not available for this item")]
    UnknownOption(CustomOptionId),
    /// A line index is out of range.
    #[error("that item is no longer in your cart")]
    NoSuchLine(usize),
    /// A line would exceed [`MAX_LINE_QUANTITY`].
    #[error("you can order at most {max} of one item")]
    TooMany { max: u32 },
}

/// A customization chosen for a cart line, copied from the menu so that the
/// order keeps its price even if the menu changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub id: CustomOptionId,
    pub group_label: String,
    pub name: String,
    pub extra_cost: Money,
}

impl SelectedOption {
    /// Resolve submitted option ids against the item's own options.
    ///
    /// Duplicate ids collapse; the result is sorted by id.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownOption`] if an id is not one of `available`.
    pub fn resolve(
        available: &[CustomOption],
        chosen: &[CustomOptionId],
    ) -> Result<Vec<Self>, CartError> {
        let mut ids = chosen.to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids.into_iter()
            .map(|id| {
                available
                    .iter()
                    .find(|option| option.id == id)
                    .map(Self::from)
                    .ok_or(CartError::UnknownOption(id))
            })
            .collect()
    }
}

impl From<&CustomOption> for SelectedOption {
    fn from(option: &CustomOption) -> Self {
        Self {
            id: option.id,
            group_label: option.group_label.clone(),
            name: option.option_name.clone(),
            extra_cost: option.extra_cost,
        }
    }
}

/// One row of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(default)]
    pub options: Vec<SelectedOption>,
}

impl CartLine {
    /// Price of one unit including customizations.
    #[must_use]
    pub fn unit_total(&self) -> Money {
        self.unit_price + self.options.iter().map(|option| option.extra_cost).sum::<Money>()
    }

    /// `(unit price + customization costs) × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.unit_total() * self.quantity
    }

    /// Reward points: whole units of the base price per unit ordered.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.unit_price.whole_units().saturating_mul(self.quantity)
    }

    /// Comma-separated option names, empty when there are none.
    #[must_use]
    pub fn options_summary(&self) -> String {
        self.options
            .iter()
            .map(|option| option.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn matches(&self, item_id: MenuItemId, options: &[SelectedOption]) -> bool {
        self.item_id == item_id
            && self.options.len() == options.len()
            && self
                .options
                .iter()
                .zip(options)
                .all(|(a, b)| a.id == b.id)
    }
}

/// A visitor's cart for one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The cart lines, in the order they were added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `item` with the given customizations.
    ///
    /// Returns the resulting quantity of the affected line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Unavailable`] if the item is inactive and
    /// [`CartError::TooMany`] if the line is already full.
    pub fn add(
        &mut self,
        item: &MenuItem,
        mut options: Vec<SelectedOption>,
    ) -> Result<u32, CartError> {
        if !item.is_active {
            return Err(CartError::Unavailable(item.name.clone()));
        }
        options.sort_unstable_by_key(|option| option.id);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches(item.id, &options))
        {
            if line.quantity >= MAX_LINE_QUANTITY {
                return Err(CartError::TooMany {
                    max: MAX_LINE_QUANTITY,
                });
            }
            line.quantity += 1;
            return Ok(line.quantity);
        }

        self.lines.push(CartLine {
            item_id: item.id,
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            options,
        });
        Ok(1)
    }

    /// Remove the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoSuchLine`] if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::NoSuchLine(index));
        }
        Ok(self.lines.remove(index))
    }

    /// Set the quantity of the line at `index`; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoSuchLine`] if `index` is out of range and
    /// [`CartError::TooMany`] above [`MAX_LINE_QUANTITY`].
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(index).map(|_| ());
        }
        if quantity > MAX_LINE_QUANTITY {
            return Err(CartError::TooMany {
                max: MAX_LINE_QUANTITY,
            });
        }
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::NoSuchLine(index))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Change the quantity of the line at `index` by `delta`, removing the
    /// line if it drops to zero or below.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NoSuchLine`] if `index` is out of range and
    /// [`CartError::TooMany`] if the result exceeds [`MAX_LINE_QUANTITY`].
    pub fn adjust(&mut self, index: usize, delta: i32) -> Result<(), CartError> {
        let current = self
            .lines
            .get(index)
            .ok_or(CartError::NoSuchLine(index))?
            .quantity;
        let updated = i64::from(current) + i64::from(delta);
        let quantity = u32::try_from(updated.max(0)).map_err(|_| CartError::TooMany {
            max: MAX_LINE_QUANTITY,
        })?;
        self.set_quantity(index, quantity)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count: u32, line| count.saturating_add(line.quantity))
    }

    /// Reward points earned by this cart.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |points: u32, line| points.saturating_add(line.points()))
    }
}

/// Reward level for a points balance, starting at level 1.
#[must_use]
pub const fn reward_level(points: u32) -> u32 {
    points / POINTS_PER_LEVEL + 1
}

/// Points still needed to reach the next level.
#[must_use]
pub const fn points_to_next_level(points: u32) -> u32 {
    POINTS_PER_LEVEL - points % POINTS_PER_LEVEL
}
