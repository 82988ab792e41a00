//! Checkout validation.
//!
//! A submitted cart becomes an [`OrderDraft`] only when the customer gave a
//! name and a phone number and the cart has something in it. The storefront
//! persists the draft and upserts the customer by phone.

use serde::Serialize;

use crate::cart::{Cart, CartLine};
use crate::types::{Money, StoreId};

/// Reasons a checkout is refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// Customer name is blank.
    #[error("Missing information: please enter your name")]
    MissingName,
    /// Phone number is blank.
    #[error("Missing information: please enter your phone number")]
    MissingPhone,
    /// Nothing to order.
    #[error("Your cart is empty")]
    EmptyCart,
}

/// A validated order ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    pub store_id: StoreId,
    pub customer_name: String,
    pub phone: String,
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub points: u32,
}

impl OrderDraft {
    /// Validate checkout input against the visitor's cart.
    ///
    /// Name and phone are trimmed before checking.
    ///
    /// # Errors
    ///
    /// Returns the first [`CheckoutError`] that applies, checking name, then
    /// phone, then the cart.
    pub fn new(
        store_id: StoreId,
        cart: &Cart,
        customer_name: &str,
        phone: &str,
    ) -> Result<Self, CheckoutError> {
        let customer_name = customer_name.trim();
        let phone = phone.trim();
        if customer_name.is_empty() {
            return Err(CheckoutError::MissingName);
        }
        if phone.is_empty() {
            return Err(CheckoutError::MissingPhone);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(Self {
            store_id,
            customer_name: customer_name.to_owned(),
            phone: phone.to_owned(),
            lines: cart.lines().to_vec(),
            total: cart.total(),
            points: cart.points(),
        })
    }

    /// The cart lines as stored in `orders.items_json`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn items_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(&self.lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::MenuItem;
    use crate::types::{CategoryId, MenuItemId};

    fn cart_with_one_item() -> Cart {
        let mut cart = Cart::new();
        let item = MenuItem {
            id: MenuItemId::new(1),
            category_id: CategoryId::new(1),
            name: "Pão de Queijo".to_owned(),
            description: String::new(),
            price: Money::from_cents(650),
            image_url: None,
            is_customizable: false,
            is_active: true,
            display_order: 0,
        };
        cart.add(&item, Vec::new()).unwrap();
        cart.add(&item, Vec::new()).unwrap();
        cart
    }

    #[test]
    fn test_valid_checkout() {
        let draft =
            OrderDraft::new(StoreId::new(3), &cart_with_one_item(), " Ana ", " 555-0100 ").unwrap();
        assert_eq!(draft.customer_name, "Ana");
        assert_eq!(draft.phone, "555-0100");
        assert_eq!(draft.total, Money::from_cents(1300));
        assert_eq!(draft.points, 12);

        let json = draft.items_json().unwrap();
        assert_eq!(json[0]["quantity"], 2);
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(
            OrderDraft::new(StoreId::new(3), &cart_with_one_item(), "  ", "555"),
            Err(CheckoutError::MissingName)
        );
    }

    #[test]
    fn test_missing_phone() {
        assert_eq!(
            OrderDraft::new(StoreId::new(3), &cart_with_one_item(), "Ana", ""),
            Err(CheckoutError::MissingPhone)
        );
    }

    #[test]
    fn test_empty_cart() {
        assert_eq!(
            OrderDraft::new(StoreId::new(3), &Cart::new(), "Ana", "555"),
            Err(CheckoutError::EmptyCart)
        );
    }
}
