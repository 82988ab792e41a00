//! Order reads and status changes for the owner's store.

use sqlx::PgPool;

use foodia_core::models::Order;
use foodia_core::{OrderId, OrderStatus, StoreId};

use super::RepositoryError;

const ORDER_COLUMNS: &str =
    "id, store_id, customer_name, phone, items_json, total, status, created_at";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every order of a store, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: StoreId) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM foodia.orders \
             WHERE store_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let orders = sqlx::query_as::<_, Order>(&sql)
            .bind(store_id)
            .fetch_all(self.pool)
            .await?;
        Ok(orders)
    }

    /// Move an order one step forward (`new → preparing → delivered`).
    ///
    /// The update is conditional on the status read, so two clicks racing
    /// each other advance the order once. Returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order is not the store's.
    /// Returns `RepositoryError::Conflict` if the order is already delivered
    /// or changed concurrently.
    pub async fn advance(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<OrderStatus, RepositoryError> {
        let current = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM foodia.orders WHERE id = $2 AND store_id = $1",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| RepositoryError::NotFound("order".to_owned()))?;

        let next = current
            .next()
            .filter(|next| current.can_transition_to(*next))
            .ok_or_else(|| RepositoryError::Conflict(format!("order is already {current}")))?;

        let result = sqlx::query(
            r"
            UPDATE foodia.orders
            SET status = $4
            WHERE id = $2 AND store_id = $1 AND status = $3
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(current)
        .bind(next)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Conflict(
                "order status changed, reload and try again".to_owned(),
            ));
        }

        tracing::info!(order_id = %id, from = %current, to = %next, "Order advanced");
        Ok(next)
    }
}
