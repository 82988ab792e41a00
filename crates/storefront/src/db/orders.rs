//! Order placement.

use sqlx::PgPool;

use foodia_core::models::Order;
use foodia_core::order::OrderDraft;

use super::RepositoryError;

/// Writes orders and keeps the customer list current.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert the order and upsert the customer in one transaction.
    ///
    /// The customer row is keyed by `(phone, store_id)`; a repeat customer
    /// gets their name refreshed and `last_order_at` bumped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the cart lines cannot be
    /// serialized and `RepositoryError::Database` if either write fails.
    pub async fn place(&self, draft: &OrderDraft) -> Result<Order, RepositoryError> {
        let items_json = draft
            .items_json()
            .map_err(|e| RepositoryError::DataCorruption(format!("cart lines: {e}")))?;

        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(
            r"
            INSERT INTO foodia.orders (store_id, customer_name, phone, items_json, total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, store_id, customer_name, phone, items_json, total, status, created_at
            ",
        )
        .bind(draft.store_id)
        .bind(&draft.customer_name)
        .bind(&draft.phone)
        .bind(&items_json)
        .bind(draft.total)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO foodia.customers (store_id, name, phone, last_order_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (phone, store_id)
            DO UPDATE SET name = EXCLUDED.name, last_order_at = EXCLUDED.last_order_at
            ",
        )
        .bind(draft.store_id)
        .bind(&draft.customer_name)
        .bind(&draft.phone)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %order.id,
            store_id = %order.store_id,
            total = %order.total,
            "Order placed"
        );
        Ok(order)
    }
}
