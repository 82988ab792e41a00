//! Menu projection.
//!
//! Turns the flat category, item, and option rows of a store into the nested
//! sections the ordering page and the builder preview render.

use crate::models::{Category, CustomOption, MenuItem};

/// Who the menu is being shown to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Customers see only active items and never an empty category.
    Customer,
    /// The owner sees everything.
    Owner,
}

/// Options of an item sharing one `group_label`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGroup {
    pub label: String,
    pub options: Vec<CustomOption>,
}

/// An item together with its grouped options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub item: MenuItem,
    pub option_groups: Vec<OptionGroup>,
}

/// A category and its items, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub category: Category,
    pub entries: Vec<MenuEntry>,
}

/// Group options by label, keeping labels in first-seen order.
#[must_use]
pub fn option_groups(options: &[CustomOption]) -> Vec<OptionGroup> {
    let mut groups: Vec<OptionGroup> = Vec::new();
    for option in options {
        if let Some(group) = groups.iter_mut().find(|g| g.label == option.group_label) {
            group.options.push(option.clone());
        } else {
            groups.push(OptionGroup {
                label: option.group_label.clone(),
                options: vec![option.clone()],
            });
        }
    }
    groups
}

/// Build display sections from a store's rows.
///
/// Categories and items are ordered by `display_order`, ties broken by id.
/// Options of items that are not customizable are dropped.
#[must_use]
pub fn sections(
    categories: &[Category],
    items: &[MenuItem],
    options: &[CustomOption],
    audience: Audience,
) -> Vec<MenuSection> {
    let mut categories = categories.to_vec();
    categories.sort_by_key(|category| (category.display_order, category.id));

    categories
        .into_iter()
        .filter_map(|category| {
            let mut in_category: Vec<&MenuItem> = items
                .iter()
                .filter(|item| item.category_id == category.id)
                .filter(|item| audience == Audience::Owner || item.is_active)
                .collect();
            in_category.sort_by_key(|item| (item.display_order, item.id));

            let entries: Vec<MenuEntry> = in_category
                .into_iter()
                .map(|item| {
                    let own: Vec<CustomOption> = options
                        .iter()
                        .filter(|option| option.item_id == item.id)
                        .cloned()
                        .collect();
                    MenuEntry {
                        item: item.clone(),
                        option_groups: if item.is_customizable {
                            option_groups(&own)
                        } else {
                            Vec::new()
                        },
                    }
                })
                .collect();

            if entries.is_empty() && audience == Audience::Customer {
                None
            } else {
                Some(MenuSection { category, entries })
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{CategoryId, CustomOptionId, MenuItemId, Money, StoreId};

    fn category(id: i32, order: i32) -> Category {
        Category {
            id: CategoryId::new(id),
            store_id: StoreId::new(1),
            name: format!("Category {id}"),
            display_order: order,
        }
    }

    fn item(id: i32, category_id: i32, order: i32, active: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            category_id: CategoryId::new(category_id),
            name: format!("Item {id}"),
            description: String::new(),
            price: Money::from_cents(500),
            image_url: None,
            is_customizable: true,
            is_active: active,
            display_order: order,
        }
    }

    fn option(id: i32, item_id: i32, label: &str) -> CustomOption {
        CustomOption {
            id: CustomOptionId::new(id),
            item_id: MenuItemId::new(item_id),
            group_label: label.to_owned(),
            option_name: format!("Option {id}"),
            extra_cost: Money::ZERO,
        }
    }

    #[test]
    fn test_sections_ordered_and_empty_skipped_for_customers() {
        let categories = [category(1, 2), category(2, 1), category(3, 0)];
        let items = [item(10, 1, 1, true), item(11, 1, 0, true), item(12, 2, 0, true)];

        let menu = sections(&categories, &items, &[], Audience::Customer);
        let names: Vec<_> = menu.iter().map(|s| s.category.id.as_i32()).collect();
        assert_eq!(names, vec![2, 1]);

        let first_items: Vec<_> = menu[1].entries.iter().map(|e| e.item.id.as_i32()).collect();
        assert_eq!(first_items, vec![11, 10]);
    }

    #[test]
    fn test_inactive_items_hidden_from_customers_only() {
        let categories = [category(1, 0)];
        let items = [item(10, 1, 0, false)];

        assert!(sections(&categories, &items, &[], Audience::Customer).is_empty());
        let owner = sections(&categories, &items, &[], Audience::Owner);
        assert_eq!(owner.len(), 1);
        assert_eq!(owner[0].entries.len(), 1);
    }

    #[test]
    fn test_option_groups_keep_first_seen_order() {
        let options = [
            option(1, 10, "Spice Level"),
            option(2, 10, "Extras"),
            option(3, 10, "Spice Level"),
        ];
        let groups = option_groups(&options);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Spice Level");
        assert_eq!(groups[0].options.len(), 2);
        assert_eq!(groups[1].label, "Extras");
    }

    #[test]
    fn test_options_attach_to_their_item() {
        let categories = [category(1, 0)];
        let mut plain = item(11, 1, 1, true);
        plain.is_customizable = false;
        let items = [item(10, 1, 0, true), plain];
        let options = [option(1, 10, "Size"), option(2, 11, "Size")];

        let menu = sections(&categories, &items, &options, Audience::Customer);
        assert_eq!(menu[0].entries[0].option_groups.len(), 1);
        assert!(menu[0].entries[1].option_groups.is_empty());
    }
}
