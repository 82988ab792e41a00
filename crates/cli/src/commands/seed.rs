//! Load a demo store from a YAML file.
//!
//! Replaces the account's store configuration, menu, orders, and customers in
//! one transaction. The file is parsed and checked before any connection is
//! made, so a typo never leaves a half-seeded store behind.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

use foodia_admin::db::{AccountRepository, StoreRepository};
use foodia_core::cart::{Cart, SelectedOption};
use foodia_core::models::{CustomOption, MenuItem};
use foodia_core::order::OrderDraft;
use foodia_core::{
    CategoryId, CustomOptionId, Email, HexColor, Language, MenuItemId, Money, OrderStatus, StoreId,
    StoreSlug,
};

use super::connect;

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
pub struct DemoStore {
    pub store: StoreSeed,
    pub categories: Vec<CategorySeed>,
    #[serde(default)]
    pub orders: Vec<OrderSeed>,
}

#[derive(Debug, Deserialize)]
pub struct StoreSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub primary_color: String,
    pub button_color: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub gamified_ordering: bool,
    #[serde(default)]
    pub published: bool,
    pub store_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    pub items: Vec<ItemSeed>,
}

#[derive(Debug, Deserialize)]
pub struct ItemSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub options: Vec<OptionSeed>,
}

#[derive(Debug, Deserialize)]
pub struct OptionSeed {
    pub group: String,
    pub name: String,
    pub extra_cost: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderSeed {
    pub customer: String,
    pub phone: String,
    #[serde(default)]
    pub status: OrderStatus,
    /// How long before the seed run the order was placed.
    pub hours_ago: i64,
    pub lines: Vec<LineSeed>,
}

#[derive(Debug, Deserialize)]
pub struct LineSeed {
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub options: Vec<String>,
}

const fn default_active() -> bool {
    true
}

const fn default_quantity() -> u32 {
    1
}

/// Check a parsed seed file, returning one message per problem.
#[must_use]
pub fn validate(seed: &DemoStore) -> Vec<String> {
    let mut errors = Vec::new();

    if seed.store.name.trim().is_empty() {
        errors.push("store.name is empty".to_owned());
    }
    for (field, value) in [
        ("primary_color", &seed.store.primary_color),
        ("button_color", &seed.store.button_color),
    ] {
        if let Err(e) = HexColor::parse(value) {
            errors.push(format!("store.{field}: {e}"));
        }
    }
    if let Some(slug) = &seed.store.store_url
        && let Err(e) = StoreSlug::parse(slug)
    {
        errors.push(format!("store.store_url: {e}"));
    }
    if seed.categories.is_empty() {
        errors.push("at least one category is required".to_owned());
    }

    let mut items: HashMap<&str, &ItemSeed> = HashMap::new();
    for category in &seed.categories {
        for item in &category.items {
            if let Err(e) = Money::parse(&item.price) {
                errors.push(format!("{}: price {e}", item.name));
            }
            for option in &item.options {
                if let Some(cost) = &option.extra_cost
                    && let Err(e) = Money::parse(cost)
                {
                    errors.push(format!("{} / {}: extra cost {e}", item.name, option.name));
                }
            }
            if items.insert(item.name.as_str(), item).is_some() {
                errors.push(format!("item {} appears more than once", item.name));
            }
        }
    }

    for (index, order) in seed.orders.iter().enumerate() {
        let label = format!("orders[{index}]");
        if order.customer.trim().is_empty() || order.phone.trim().is_empty() {
            errors.push(format!("{label}: customer and phone are required"));
        }
        if order.hours_ago < 0 {
            errors.push(format!("{label}: hours_ago must not be negative"));
        }
        if order.lines.is_empty() {
            errors.push(format!("{label}: no lines"));
        }
        for line in &order.lines {
            let Some(item) = items.get(line.item.as_str()) else {
                errors.push(format!("{label}: unknown item {}", line.item));
                continue;
            };
            if !item.active {
                errors.push(format!("{label}: {} is not active", line.item));
            }
            if line.quantity == 0 {
                errors.push(format!("{label}: {} has quantity 0", line.item));
            }
            for name in &line.options {
                if !item.options.iter().any(|option| option.name == *name) {
                    errors.push(format!("{label}: {} has no option {name}", line.item));
                }
            }
        }
    }

    errors
}

/// A menu item as inserted, with its options.
struct SeededItem {
    item: MenuItem,
    options: Vec<CustomOption>,
}

/// Seed the demo store for `account_email` from a YAML file.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, the account does not
/// exist, or a database operation fails.
pub async fn demo(file_path: &str, account_email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading demo store from file");

    let content = tokio::fs::read_to_string(path).await?;
    let seed: DemoStore = serde_yaml::from_str(&content)?;

    let errors = validate(&seed);
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        return Err(format!("{} problem(s) in {file_path}", errors.len()).into());
    }

    let email = Email::parse(account_email)?;
    let pool = connect().await?;

    let (account, _) = AccountRepository::new(&pool)
        .get_with_password_hash(&email)
        .await?
        .ok_or_else(|| format!("No account for {email}; run `foodia-cli account create` first"))?;
    let store = StoreRepository::new(&pool).get_or_create(account.id).await?;

    let mut tx = pool.begin().await?;
    clear_store(&mut tx, store.id).await?;
    update_store(&mut tx, store.id, &seed.store).await?;
    let menu = insert_menu(&mut tx, store.id, &seed.categories).await?;

    let now = Utc::now();
    for order in &seed.orders {
        insert_order(&mut tx, store.id, &menu, order, now).await?;
    }
    tx.commit().await?;

    info!(
        store_id = %store.id,
        categories = seed.categories.len(),
        items = menu.len(),
        orders = seed.orders.len(),
        "Demo store loaded"
    );
    Ok(())
}

async fn clear_store(
    tx: &mut Transaction<'_, Postgres>,
    store_id: StoreId,
) -> Result<(), sqlx::Error> {
    // Items and options go with their categories
    for table in ["orders", "customers", "categories"] {
        let sql = format!("DELETE FROM foodia.{table} WHERE store_id = $1");
        sqlx::query(&sql).bind(store_id).execute(&mut **tx).await?;
    }
    Ok(())
}

async fn update_store(
    tx: &mut Transaction<'_, Postgres>,
    store_id: StoreId,
    seed: &StoreSeed,
) -> Result<(), Box<dyn std::error::Error>> {
    let primary_color = HexColor::parse(&seed.primary_color)?;
    let button_color = HexColor::parse(&seed.button_color)?;
    let store_url = seed.store_url.as_deref().map(StoreSlug::parse).transpose()?;
    let is_published = seed.published && store_url.is_some();

    sqlx::query(
        r"
        UPDATE foodia.stores
        SET name = $2, description = $3, logo_url = $4, banner_url = $5,
            primary_color = $6, button_color = $7, language = $8,
            gamified_ordering = $9, is_published = $10, store_url = $11,
            updated_at = now()
        WHERE id = $1
        ",
    )
    .bind(store_id)
    .bind(seed.name.trim())
    .bind(&seed.description)
    .bind(&seed.logo_url)
    .bind(&seed.banner_url)
    .bind(&primary_color)
    .bind(&button_color)
    .bind(seed.language)
    .bind(seed.gamified_ordering)
    .bind(is_published)
    .bind(&store_url)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_menu(
    tx: &mut Transaction<'_, Postgres>,
    store_id: StoreId,
    categories: &[CategorySeed],
) -> Result<HashMap<String, SeededItem>, Box<dyn std::error::Error>> {
    let mut menu = HashMap::new();

    for (category_order, category) in categories.iter().enumerate() {
        let category_id: CategoryId = sqlx::query_scalar(
            r"
            INSERT INTO foodia.categories (store_id, name, display_order)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(store_id)
        .bind(&category.name)
        .bind(i32::try_from(category_order)?)
        .fetch_one(&mut **tx)
        .await?;

        for (item_order, seed) in category.items.iter().enumerate() {
            let mut item = MenuItem {
                id: MenuItemId::new(0),
                category_id,
                name: seed.name.clone(),
                description: seed.description.clone(),
                price: Money::parse(&seed.price)?,
                image_url: seed.image_url.clone(),
                is_customizable: !seed.options.is_empty(),
                is_active: seed.active,
                display_order: i32::try_from(item_order)?,
            };
            item.id = sqlx::query_scalar(
                r"
                INSERT INTO foodia.menu_items
                    (category_id, name, description, price, image_url,
                     is_customizable, is_active, display_order)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                ",
            )
            .bind(item.category_id)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(&item.image_url)
            .bind(item.is_customizable)
            .bind(item.is_active)
            .bind(item.display_order)
            .fetch_one(&mut **tx)
            .await?;

            let mut options = Vec::with_capacity(seed.options.len());
            for option in &seed.options {
                let extra_cost = option
                    .extra_cost
                    .as_deref()
                    .map(Money::parse)
                    .transpose()?
                    .unwrap_or(Money::ZERO);
                let id: CustomOptionId = sqlx::query_scalar(
                    r"
                    INSERT INTO foodia.custom_options (item_id, group_label, option_name, extra_cost)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    ",
                )
                .bind(item.id)
                .bind(&option.group)
                .bind(&option.name)
                .bind(extra_cost)
                .fetch_one(&mut **tx)
                .await?;

                options.push(CustomOption {
                    id,
                    item_id: item.id,
                    group_label: option.group.clone(),
                    option_name: option.name.clone(),
                    extra_cost,
                });
            }

            menu.insert(seed.name.clone(), SeededItem { item, options });
        }
    }

    Ok(menu)
}

async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    store_id: StoreId,
    menu: &HashMap<String, SeededItem>,
    seed: &OrderSeed,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = Cart::new();
    for line in &seed.lines {
        let seeded = menu
            .get(&line.item)
            .ok_or_else(|| format!("unknown item {}", line.item))?;
        let chosen = line
            .options
            .iter()
            .map(|name| {
                seeded
                    .options
                    .iter()
                    .find(|option| option.option_name == *name)
                    .map(|option| option.id)
                    .ok_or_else(|| format!("{} has no option {name}", line.item))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let selected = SelectedOption::resolve(&seeded.options, &chosen)?;
        for _ in 0..line.quantity {
            cart.add(&seeded.item, selected.clone())?;
        }
    }

    let draft = OrderDraft::new(store_id, &cart, &seed.customer, &seed.phone)?;
    let placed_at = now - Duration::hours(seed.hours_ago);

    sqlx::query(
        r"
        INSERT INTO foodia.orders (store_id, customer_name, phone, items_json, total, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(store_id)
    .bind(&draft.customer_name)
    .bind(&draft.phone)
    .bind(draft.items_json()?)
    .bind(draft.total)
    .bind(seed.status)
    .bind(placed_at)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        r"
        INSERT INTO foodia.customers (store_id, name, phone, created_at, last_order_at)
        VALUES ($1, $2, $3, $4, $4)
        ON CONFLICT (phone, store_id) DO UPDATE
        SET name = EXCLUDED.name,
            created_at = LEAST(foodia.customers.created_at, EXCLUDED.created_at),
            last_order_at = GREATEST(foodia.customers.last_order_at, EXCLUDED.last_order_at)
        ",
    )
    .bind(store_id)
    .bind(&draft.customer_name)
    .bind(&draft.phone)
    .bind(placed_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const DEMO: &str = include_str!("../../seed/demo_store.yaml");

    #[test]
    fn bundled_demo_store_is_valid() {
        let seed: DemoStore = serde_yaml::from_str(DEMO).unwrap();
        assert_eq!(validate(&seed), Vec::<String>::new());
        assert!(!seed.orders.is_empty());
    }

    #[test]
    fn unknown_items_and_options_are_reported() {
        let yaml = r##"
store:
  name: Test Kitchen
  primary_color: "#22c55e"
  button_color: "#eab308"
categories:
  - name: Mains
    items:
      - name: Burger
        price: "10.00"
        options:
          - { group: Extras, name: Cheese, extra_cost: "1.50" }
orders:
  - customer: Ana
    phone: "555-0100"
    hours_ago: 2
    lines:
      - { item: Pizza }
      - { item: Burger, options: [Bacon] }
"##;
        let seed: DemoStore = serde_yaml::from_str(yaml).unwrap();
        let errors = validate(&seed);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("unknown item Pizza"));
        assert!(errors[1].contains("Burger has no option Bacon"));
    }

    #[test]
    fn bad_store_values_are_reported() {
        let yaml = r##"
store:
  name: " "
  primary_color: green
  button_color: "#eab308"
  store_url: "Not A Slug!"
categories: []
"##;
        let seed: DemoStore = serde_yaml::from_str(yaml).unwrap();
        let errors = validate(&seed);
        assert!(errors.iter().any(|e| e == "store.name is empty"));
        assert!(errors.iter().any(|e| e.starts_with("store.primary_color")));
        assert!(errors.iter().any(|e| e.starts_with("store.store_url")));
        assert!(errors.iter().any(|e| e.contains("category is required")));
    }

    #[test]
    fn order_defaults_apply() {
        let yaml = r"
customer: Bia
phone: '555-0101'
hours_ago: 0
lines:
  - item: Coxinha
";
        let order: OrderSeed = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.lines[0].quantity, 1);
        assert!(order.lines[0].options.is_empty());
    }
}
