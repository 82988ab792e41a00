//! The storefront writes `orders.items_json` from a checked-out cart; the
//! admin reads it back to list orders and score customers. These tests pin
//! that contract without a database.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::Utc;
use foodia_core::cart::{Cart, SelectedOption};
use foodia_core::models::{CustomOption, MenuItem, Order};
use foodia_core::order::{CheckoutError, OrderDraft};
use foodia_core::{CategoryId, CustomOptionId, MenuItemId, Money, OrderId, OrderStatus, StoreId};

fn burger() -> (MenuItem, Vec<CustomOption>) {
    let item = MenuItem {
        id: MenuItemId::new(7),
        category_id: CategoryId::new(1),
        name: "X-Burger".to_string(),
        description: String::new(),
        price: Money::from_cents(1890),
        image_url: None,
        is_customizable: true,
        is_active: true,
        display_order: 0,
    };
    let option = |id, group: &str, name: &str, cents| CustomOption {
        id: CustomOptionId::new(id),
        item_id: item.id,
        group_label: group.to_string(),
        option_name: name.to_string(),
        extra_cost: Money::from_cents(cents),
    };
    let options = vec![
        option(1, "Extras", "Bacon", 300),
        option(2, "Extras", "Egg", 200),
    ];
    (item, options)
}

fn stored(draft: &OrderDraft, id: i32) -> Order {
    Order {
        id: OrderId::new(id),
        store_id: draft.store_id,
        customer_name: draft.customer_name.clone(),
        phone: draft.phone.clone(),
        items_json: draft.items_json().unwrap(),
        total: draft.total,
        status: OrderStatus::default(),
        created_at: Utc::now(),
    }
}

#[test]
fn checked_out_lines_read_back_unchanged() {
    let (item, options) = burger();
    let mut cart = Cart::new();

    let (bacon, egg) = (CustomOptionId::new(1), CustomOptionId::new(2));
    let egg_bacon = SelectedOption::resolve(&options, &[egg, bacon]).unwrap();
    let bacon_egg = SelectedOption::resolve(&options, &[bacon, egg]).unwrap();
    cart.add(&item, egg_bacon).unwrap();
    assert_eq!(cart.add(&item, bacon_egg).unwrap(), 2);
    cart.add(&item, Vec::new()).unwrap();

    let draft = OrderDraft::new(StoreId::new(3), &cart, " Ana ", " 555-0100 ").unwrap();
    let order = stored(&draft, 42);

    assert_eq!(order.number(), "ORD-0042");
    assert_eq!(order.customer_name, "Ana");
    assert_eq!(order.lines().unwrap(), draft.lines);
    assert_eq!(order.item_count(), 3);
    // 2 × (18.90 + 3.00 + 2.00) + 18.90
    assert_eq!(order.total, Money::from_cents(6670));
    assert_eq!(order.lines().unwrap()[0].options_summary(), "Bacon, Egg");
    assert_eq!(order.status, OrderStatus::New);
}

#[test]
fn unreadable_items_count_as_zero() {
    let (item, _) = burger();
    let mut cart = Cart::new();
    cart.add(&item, Vec::new()).unwrap();
    let draft = OrderDraft::new(StoreId::new(3), &cart, "Ana", "555-0100").unwrap();

    let mut order = stored(&draft, 1);
    order.items_json = serde_json::json!({ "not": "a list" });

    assert!(order.lines().is_err());
    assert_eq!(order.item_count(), 0);
}

#[test]
fn checkout_rejects_before_anything_is_stored() {
    let (item, _) = burger();
    let empty = Cart::new();
    let mut full = Cart::new();
    full.add(&item, Vec::new()).unwrap();

    let store = StoreId::new(3);
    assert_eq!(OrderDraft::new(store, &full, "  ", "555"), Err(CheckoutError::MissingName));
    assert_eq!(OrderDraft::new(store, &full, "Ana", ""), Err(CheckoutError::MissingPhone));
    assert_eq!(OrderDraft::new(store, &empty, "Ana", "555"), Err(CheckoutError::EmptyCart));
}

#[test]
fn status_only_moves_forward_one_step() {
    assert_eq!(OrderStatus::New.next(), Some(OrderStatus::Preparing));
    assert_eq!(OrderStatus::Preparing.next(), Some(OrderStatus::Delivered));
    assert_eq!(OrderStatus::Delivered.next(), None);
    assert!(!OrderStatus::New.can_transition_to(OrderStatus::Delivered));
    assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::New));
}
