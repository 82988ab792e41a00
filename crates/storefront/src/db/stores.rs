//! Published store lookup.

use sqlx::PgPool;

use foodia_core::StoreSlug;
use foodia_core::models::Store;

use super::RepositoryError;

/// Columns selected for a [`Store`].
pub(crate) const STORE_COLUMNS: &str = "id, account_id, name, description, logo_url, banner_url, \
     primary_color, button_color, language, gamified_ordering, is_published, store_url, \
     created_at, updated_at";

/// Read-only access to stores.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a published store by its public slug.
    ///
    /// Unpublished stores are invisible to customers, so they resolve to
    /// `None` just like unknown slugs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_published_by_slug(
        &self,
        slug: &StoreSlug,
    ) -> Result<Option<Store>, RepositoryError> {
        let sql = format!(
            "SELECT {STORE_COLUMNS} FROM foodia.stores \
             WHERE store_url = $1 AND is_published = TRUE"
        );
        let store = sqlx::query_as::<_, Store>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;
        Ok(store)
    }
}
