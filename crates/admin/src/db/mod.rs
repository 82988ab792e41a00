//! Database operations for the admin panel.
//!
//! # Schema: `foodia` (shared with the storefront)
//!
//! ## Tables
//!
//! - `accounts` - Store owner sign-in (Argon2id password hashes)
//! - `stores` - One per account, created on first visit to the builder
//! - `categories`, `menu_items`, `custom_options` - The store's menu
//! - `orders` - Read and advanced through their status
//! - `customers` - Read, aggregated with orders
//! - `admin_session` - tower-sessions storage
//!
//! Every store-owned row is reached through the signed-in account's store, so
//! an owner can never read or change another tenant's data.
//!
//! # Migrations
//!
//! Migrations live in the workspace `migrations/` directory and run via:
//! ```bash
//! cargo run -p foodia-cli -- migrate
//! ```

pub mod accounts;
pub mod customers;
pub mod menu;
pub mod orders;
pub mod stores;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::AccountRepository;
pub use customers::CustomerRepository;
pub use menu::{MenuRepository, OwnerMenu};
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

    /// Requested entity was not found (or belongs to another store).
    #[error("{0} not found")]
    NotFound(String),

    /// Constraint violation (e.g., unique email or store link).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Map a unique violation to `Conflict`, everything else to `Database`.
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
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
