//! Database operations for the storefront.
//!
//! # Schema: `foodia`
//!
//! The storefront only reads published stores and their menus, and writes
//! orders and customers on checkout:
//!
//! - `stores` - looked up by `store_url` slug, published only
//! - `categories`, `menu_items`, `custom_options` - read for the order page
//! - `orders` - inserted on checkout
//! - `customers` - upserted on checkout, keyed by `(phone, store_id)`
//! - `storefront_session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations live in the workspace `migrations/` directory and run via:
//! ```bash
//! cargo run -p foodia-cli -- migrate
//! ```

pub mod menu;
pub mod orders;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use menu::{MenuRepository, StoreMenu};
pub use orders::OrderRepository;
pub use stores::StoreRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
