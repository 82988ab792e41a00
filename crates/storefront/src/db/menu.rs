//! Menu reads for the ordering page.

use sqlx::PgPool;

use foodia_core::menu::{self, Audience, MenuSection};
use foodia_core::models::{Category, CustomOption, MenuItem};
use foodia_core::{MenuItemId, StoreId};

use super::RepositoryError;

/// Everything the ordering page needs about a store's menu.
#[derive(Debug, Clone, Default)]
pub struct StoreMenu {
    pub categories: Vec<Category>,
    pub items: Vec<MenuItem>,
    pub options: Vec<CustomOption>,
}

impl StoreMenu {
    /// Customer-facing sections: ordered, active items only, no empty categories.
    #[must_use]
    pub fn sections(&self) -> Vec<MenuSection> {
        menu::sections(
            &self.categories,
            &self.items,
            &self.options,
            Audience::Customer,
        )
    }

    /// Find an item on this menu.
    #[must_use]
    pub fn item(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Options belonging to one item.
    #[must_use]
    pub fn options_for(&self, id: MenuItemId) -> Vec<CustomOption> {
        self.options
            .iter()
            .filter(|option| option.item_id == id)
            .cloned()
            .collect()
    }
}

/// Read-only access to a store's menu.
pub struct MenuRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepository<'a> {
    /// Create a new menu repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load categories, items, and options of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn for_store(&self, store_id: StoreId) -> Result<StoreMenu, RepositoryError> {
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

        let items = sqlx::query_as::<_, MenuItem>(
            r"
            SELECT i.id, i.category_id, i.name, i.description, i.price, i.image_url,
                   i.is_customizable, i.is_active, i.display_order
            FROM foodia.menu_items i
            JOIN foodia.categories c ON c.id = i.category_id
            WHERE c.store_id = $1
            ORDER BY i.display_order, i.id
            ",
        )
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

        Ok(StoreMenu {
            categories,
            items,
            options,
        })
    }
}
