//! Store repository: one store per account.

use sqlx::PgPool;

use foodia_core::models::Store;
use foodia_core::{AccountId, StoreId, StoreSlug};

use super::{RepositoryError, conflict_on_unique};
use crate::models::store_settings::{BusinessInfo, StoreConfig};

/// Columns selected for a [`Store`].
const STORE_COLUMNS: &str = "id, account_id, name, description, logo_url, banner_url, \
     primary_color, button_color, language, gamified_ordering, is_published, store_url, \
     created_at, updated_at";

/// Conflict subject when a store link is already in use.
const STORE_LINK: &str = "a store with this link";

/// Repository for the signed-in owner's store.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the account's store, creating it with defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, account_id: AccountId) -> Result<Store, RepositoryError> {
        let created = sqlx::query(
            r"
            INSERT INTO foodia.stores (account_id)
            VALUES ($1)
            ON CONFLICT (account_id) DO NOTHING
            ",
        )
        .bind(account_id)
        .execute(self.pool)
        .await?;

        if created.rows_affected() > 0 {
            tracing::info!(account_id = %account_id, "Store created");
        }

        let sql = format!("SELECT {STORE_COLUMNS} FROM foodia.stores WHERE account_id = $1");
        let store = sqlx::query_as::<_, Store>(&sql)
            .bind(account_id)
            .fetch_one(self.pool)
            .await?;
        Ok(store)
    }

    /// Save the builder's store configuration.
    ///
    /// A `None` store link leaves the current one untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the store link is taken.
    /// Returns `RepositoryError::NotFound` if the store does not exist.
    pub async fn update_config(
        &self,
        id: StoreId,
        config: &StoreConfig,
    ) -> Result<Store, RepositoryError> {
        let sql = format!(
            "UPDATE foodia.stores SET \
                 name = $2, description = $3, logo_url = $4, banner_url = $5, \
                 primary_color = $6, button_color = $7, language = $8, \
                 gamified_ordering = $9, store_url = COALESCE($10, store_url), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {STORE_COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&sql)
            .bind(id)
            .bind(&config.name)
            .bind(&config.description)
            .bind(&config.logo_url)
            .bind(&config.banner_url)
            .bind(&config.primary_color)
            .bind(&config.button_color)
            .bind(config.language)
            .bind(config.gamified_ordering)
            .bind(&config.store_url)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| conflict_on_unique(e, STORE_LINK))?
            .ok_or_else(|| RepositoryError::NotFound("store".to_owned()))
    }

    /// Save the settings page's business information.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_business(
        &self,
        id: StoreId,
        info: &BusinessInfo,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE foodia.stores
            SET name = $2, description = $3, language = $4, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&info.name)
        .bind(&info.description)
        .bind(info.language)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("store".to_owned()));
        }
        Ok(())
    }

    /// Make the store live under `slug`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if another store uses the link.
    /// Returns `RepositoryError::NotFound` if the store does not exist.
    pub async fn publish(&self, id: StoreId, slug: &StoreSlug) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE foodia.stores
            SET is_published = TRUE, store_url = $2, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(slug)
        .execute(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, STORE_LINK))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("store".to_owned()));
        }
        tracing::info!(store_id = %id, slug = %slug, "Store published");
        Ok(())
    }

    /// Take the store offline. The link is kept for republishing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store does not exist.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn unpublish(&self, id: StoreId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE foodia.stores
            SET is_published = FALSE, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("store".to_owned()));
        }
        tracing::info!(store_id = %id, "Store unpublished");
        Ok(())
    }
}
