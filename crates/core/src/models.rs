//! Rows of the `foodia` schema.
//!
//! With the `postgres` feature these derive `sqlx::FromRow`, so repositories
//! can select straight into them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::types::{
    AccountId, CategoryId, CustomOptionId, CustomerId, HexColor, Language, MenuItemId, Money,
    OrderId, OrderStatus, StoreId, StoreSlug,
};

/// A tenant's storefront. Each account owns at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Store {
    pub id: StoreId,
    pub account_id: AccountId,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub primary_color: HexColor,
    pub button_color: HexColor,
    pub language: Language,
    pub gamified_ordering: bool,
    pub is_published: bool,
    pub store_url: Option<StoreSlug>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Name given to a store created on first visit to the builder.
    pub const DEFAULT_NAME: &'static str = "Nova Loja";
}

/// A menu section such as "Drinks".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub name: String,
    pub display_order: i32,
}

impl Category {
    /// Name given to a freshly added category.
    pub const DEFAULT_NAME: &'static str = "New Category";
}

/// A sellable dish or drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: MenuItemId,
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: Option<String>,
    pub is_customizable: bool,
    pub is_active: bool,
    pub display_order: i32,
}

impl MenuItem {
    /// Name given to a freshly added item.
    pub const DEFAULT_NAME: &'static str = "New Item";
}

/// A selectable extra for a customizable item, e.g. "Spice Level: Hot".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct CustomOption {
    pub id: CustomOptionId,
    pub item_id: MenuItemId,
    pub group_label: String,
    pub option_name: String,
    pub extra_cost: Money,
}

/// A submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Order {
    pub id: OrderId,
    pub store_id: StoreId,
    pub customer_name: String,
    pub phone: String,
    pub items_json: serde_json::Value,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Order number shown to staff, e.g. `ORD-0042`.
    #[must_use]
    pub fn number(&self) -> String {
        format!("ORD-{:04}", self.id.as_i32())
    }

    /// Decode the cart lines captured at checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored JSON does not match [`CartLine`].
    pub fn lines(&self) -> Result<Vec<CartLine>, serde_json::Error> {
        serde_json::from_value(self.items_json.clone())
    }

    /// Total number of units ordered, or zero if the lines are unreadable.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines()
            .map(|lines| {
                lines
                    .iter()
                    .fold(0, |count: u32, line| count.saturating_add(line.quantity))
            })
            .unwrap_or(0)
    }
}

/// Someone who has ordered from a store, keyed by phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: CustomerId,
    pub store_id: StoreId,
    pub name: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub last_order_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn order(items_json: serde_json::Value) -> Order {
        Order {
            id: OrderId::new(42),
            store_id: StoreId::new(1),
            customer_name: "Ana".to_owned(),
            phone: "555-0100".to_owned(),
            items_json,
            total: Money::from_cents(1000),
            status: OrderStatus::New,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_number_is_zero_padded() {
        assert_eq!(order(serde_json::json!([])).number(), "ORD-0042");
    }

    #[test]
    fn test_lines_decode_cart_json() {
        let json = serde_json::json!([{
            "item_id": 3,
            "name": "Coxinha",
            "unit_price": "4.50",
            "quantity": 2,
            "options": []
        }]);
        let order = order(json);
        let lines = order.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Coxinha");
        assert_eq!(order.item_count(), 2);
    }

    #[test]
    fn test_unreadable_lines_count_as_zero() {
        assert_eq!(order(serde_json::json!({"bad": true})).item_count(), 0);
    }
}
