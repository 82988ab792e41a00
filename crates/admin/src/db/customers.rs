//! Customer reads for the owner's store.

use sqlx::PgPool;

use foodia_core::StoreId;
use foodia_core::models::Customer;

use super::RepositoryError;

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every customer of a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Customer>, RepositoryError> {
        let customers = sqlx::query_as::<_, Customer>(
            r"
            SELECT id, store_id, name, phone, created_at, last_order_at
            FROM foodia.customers
            WHERE store_id = $1
            ORDER BY last_order_at DESC NULLS LAST, id
            ",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;
        Ok(customers)
    }
}
