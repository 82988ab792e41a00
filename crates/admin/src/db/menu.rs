//! Menu repository: categories, items, and custom options of one store.
//!
//! Every statement is scoped by `store_id`, joining through `categories` for
//! items and options. Ids belonging to another store behave exactly like ids
//! that do not exist.

use sqlx::PgPool;

use foodia_core::menu::{self, Audience, MenuSection};
use foodia_core::models::{Category, CustomOption, MenuItem};
use foodia_core::publish::PublishChecklist;
use foodia_core::{CategoryId, CustomOptionId, MenuItemId, Money, StoreId};

use super::RepositoryError;
use crate::models::products::ProductDraft;

const ITEM_COLUMNS: &str = "i.id, i.category_id, i.name, i.description, i.price, i.image_url, \
     i.is_customizable, i.is_active, i.display_order";

/// A store's whole menu as the owner sees it.
#[derive(Debug, Clone, Default)]
pub struct OwnerMenu {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
    pub options: Vec<CustomOption>,
}

impl OwnerMenu {
    /// Display sections for the given audience.
    #[must_use]
    pub fn sections(&self, audience: Audience) -> Vec<MenuSection> {
        menu::sections(&self.categories, &self.items, &self.options, audience)
    }

    /// Items customers can currently order.
    #[must_use]
    pub fn active_item_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_active).count()
    }

    /// Publish checklist for this menu under the given store name.
    #[must_use]
    pub fn checklist(&self, store_name: &str) -> PublishChecklist {
        PublishChecklist::new(store_name, self.categories.len(), self.active_item_count())
    }

    /// Name of a category, empty if unknown.
    #[must_use]
    pub fn category_name(&self, id: CategoryId) -> &str {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map_or("", |category| category.name.as_str())
    }
}

fn not_found(what: &str) -> RepositoryError {
    RepositoryError::NotFound(what.to_owned())
}

/// Repository for menu database operations.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load categories, items (active or not), and options of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn load(&self, store_id: StoreId) -> Result<OwnerMenu, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, store_id, name, display_order
            FROM foodia.categories
            WHERE store_id = $1
            ORDER BY display_order, id
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM foodia.menu_items i \
             JOIN foodia.categories c ON c.id = i.category_id \
             WHERE c.store_id = $1 \
             ORDER BY c.display_order, c.id, i.display_order, i.id"
        );
        let items = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(store_id)
            .fetch_all(self.pool)
            .await?;

        let options = sqlx::query_as::<_, CustomOption>(
            r"
            SELECT o.id, o.item_id, o.group_label, o.option_name, o.extra_cost
            FROM foodia.custom_options o
            JOIN foodia.menu_items i ON i.id = o.item_id
            JOIN foodia.categories c ON c.id = i.category_id
            WHERE c.store_id = $1
            ORDER BY o.id
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        Ok(OwnerMenu {
            categories,
            items,
            options,
        })
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Append a category named "New Category" at the end of the menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_category(&self, store_id: StoreId) -> Result<Category, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            INSERT INTO foodia.categories (store_id, name, display_order)
            SELECT $1, $2, COUNT(*)::INTEGER
            FROM foodia.categories
            WHERE store_id = $1
            RETURNING id, store_id, name, display_order
            ",
        )
        .bind(store_id)
        .bind(Category::DEFAULT_NAME)
        .fetch_one(self.pool)
        .await?;

        tracing::info!(store_id = %store_id, category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is not the store's.
    pub async fn rename_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        name: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE foodia.categories SET name = $3 WHERE id = $2 AND store_id = $1",
        )
        .bind(store_id)
        .bind(id)
        .bind(name)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("category"));
        }
        Ok(())
    }

    /// Delete a category along with its items and their options.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is not the store's.
    pub async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM foodia.categories WHERE id = $2 AND store_id = $1")
            .bind(store_id)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("category"));
        }
        tracing::info!(store_id = %store_id, category_id = %id, "Category deleted");
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Get one of the store's items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not the store's.
    pub async fn get_item(
        &self,
        store_id: StoreId,
        id: MenuItemId,
    ) -> Result<MenuItem, RepositoryError> {
        let sql = format!(
            "SELECT {ITEM_COLUMNS} FROM foodia.menu_items i \
             JOIN foodia.categories c ON c.id = i.category_id \
             WHERE c.store_id = $1 AND i.id = $2"
        );
        sqlx::query_as::<_, MenuItem>(&sql)
            .bind(store_id)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found("menu item"))
    }

    /// Add a "New Item" priced at zero to the store's first category.
    ///
    /// Returns `None` when the store has no category yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn create_placeholder_item(
        &self,
        store_id: StoreId,
    ) -> Result<Option<MenuItem>, RepositoryError> {
        let first = sqlx::query_scalar::<_, CategoryId>(
            r"
            SELECT id FROM foodia.categories
            WHERE store_id = $1
            ORDER BY display_order, id
            LIMIT 1
            ",
        )
        .bind(store_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(category_id) = first else {
            return Ok(None);
        };

        let draft = ProductDraft {
            category_id,
            name: MenuItem::DEFAULT_NAME.to_owned(),
            description: String::new(),
            price: Money::ZERO,
            image_url: None,
            is_customizable: false,
        };
        self.create_item(store_id, &draft).await.map(Some)
    }

    /// Add an item at the end of its category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category is not the store's.
    pub async fn create_item(
        &self,
        store_id: StoreId,
        draft: &ProductDraft,
    ) -> Result<MenuItem, RepositoryError> {
        let item = sqlx::query_as::<_, MenuItem>(
            r"
            INSERT INTO foodia.menu_items
                (category_id, name, description, price, image_url, is_customizable, display_order)
            SELECT c.id, $3, $4, $5, $6, $7,
                   (SELECT COUNT(*)::INTEGER FROM foodia.menu_items WHERE category_id = c.id)
            FROM foodia.categories c
            WHERE c.id = $2 AND c.store_id = $1
            RETURNING id, category_id, name, description, price, image_url,
                      is_customizable, is_active, display_order
            ",
        )
        .bind(store_id)
        .bind(draft.category_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.image_url)
        .bind(draft.is_customizable)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found("category"))?;

        tracing::info!(store_id = %store_id, item_id = %item.id, "Menu item created");
        Ok(item)
    }

    /// Overwrite an item's fields, possibly moving it to another category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item or the target category
    /// is not the store's.
    pub async fn update_item(
        &self,
        store_id: StoreId,
        id: MenuItemId,
        draft: &ProductDraft,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE foodia.menu_items i
            SET category_id = $3, name = $4, description = $5, price = $6,
                image_url = $7, is_customizable = $8
            FROM foodia.categories c, foodia.categories target
            WHERE i.id = $2
              AND c.id = i.category_id AND c.store_id = $1
              AND target.id = $3 AND target.store_id = $1
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(draft.category_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(&draft.image_url)
        .bind(draft.is_customizable)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("menu item"));
        }
        Ok(())
    }

    /// Flip an item's availability, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not the store's.
    pub async fn toggle_item_active(
        &self,
        store_id: StoreId,
        id: MenuItemId,
    ) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            r"
            UPDATE foodia.menu_items i
            SET is_active = NOT i.is_active
            FROM foodia.categories c
            WHERE i.id = $2 AND c.id = i.category_id AND c.store_id = $1
            RETURNING i.is_active
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found("menu item"))
    }

    /// Delete an item and its options.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not the store's.
    pub async fn delete_item(&self, store_id: StoreId, id: MenuItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM foodia.menu_items i
            USING foodia.categories c
            WHERE i.id = $2 AND c.id = i.category_id AND c.store_id = $1
            ",
        )
        .bind(store_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("menu item"));
        }
        tracing::info!(store_id = %store_id, item_id = %id, "Menu item deleted");
        Ok(())
    }

    // =========================================================================
    // Custom options
    // =========================================================================

    /// Add a customization to one of the store's items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is not the store's.
    pub async fn create_option(
        &self,
        store_id: StoreId,
        item_id: MenuItemId,
        group_label: &str,
        option_name: &str,
        extra_cost: Money,
    ) -> Result<CustomOption, RepositoryError> {
        sqlx::query_as::<_, CustomOption>(
            r"
            INSERT INTO foodia.custom_options (item_id, group_label, option_name, extra_cost)
            SELECT i.id, $3, $4, $5
            FROM foodia.menu_items i
            JOIN foodia.categories c ON c.id = i.category_id
            WHERE i.id = $2 AND c.store_id = $1
            RETURNING id, item_id, group_label, option_name, extra_cost
            ",
        )
        .bind(store_id)
        .bind(item_id)
        .bind(group_label)
        .bind(option_name)
        .bind(extra_cost)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found("menu item"))
    }

    /// Remove a customization.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the option is not the store's.
    pub async fn delete_option(
        &self,
        store_id: StoreId,
        id: CustomOptionId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM foodia.custom_options o
            USING foodia.menu_items i, foodia.categories c
            WHERE o.id = $2 AND i.id = o.item_id AND c.id = i.category_id AND c.store_id = $1
            ",
        )
        .bind(store_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("option"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn menu(active: &[bool]) -> OwnerMenu {
        let category = CategoryId::new(1);
        OwnerMenu {
            categories: vec![Category {
                id: category,
                store_id: StoreId::new(1),
                name: "Burgers".to_owned(),
                display_order: 0,
            }],
            items: active
                .iter()
                .zip(1..)
                .map(|(&is_active, id)| MenuItem {
                    id: MenuItemId::new(id),
                    category_id: category,
                    name: format!("Item {id}"),
                    description: String::new(),
                    price: Money::from_cents(1500),
                    image_url: None,
                    is_customizable: false,
                    is_active,
                    display_order: 0,
                })
                .collect(),
            options: Vec::new(),
        }
    }

    #[test]
    fn test_only_inactive_items_is_not_ready() {
        let checklist = menu(&[false, false]).checklist("Casa");
        assert!(!checklist.is_ready());
        assert_eq!(checklist.missing(), vec!["at least one active menu item"]);
        assert_eq!(checklist.items()[2].label, "Active menu items (0)");
    }

    #[test]
    fn test_one_active_item_is_enough() {
        let owner_menu = menu(&[false, true, false]);
        assert_eq!(owner_menu.active_item_count(), 1);
        assert!(owner_menu.checklist("Casa").ensure_ready().is_ok());
    }
}
