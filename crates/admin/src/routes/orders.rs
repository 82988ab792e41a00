//! Orders list and status changes.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::flash::Flash;
use foodia_core::models::Order;
use foodia_core::{OrderId, OrderStatus};

use crate::db::{OrderRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::models::orders::{DateFilter, OrderFilter, OrderStats, OrdersQuery};
use crate::state::AppState;

use super::{NavView, current_store, redirect_with, render};

/// A `<select>` choice.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Order row for templates.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: OrderId,
    pub number: String,
    pub customer_name: String,
    pub phone: String,
    pub items: Vec<String>,
    pub total: String,
    pub status: &'static str,
    pub status_label: &'static str,
    pub placed_at: String,
    pub advance_label: Option<&'static str>,
}

impl OrderView {
    fn new(order: &Order) -> Self {
        let items = match order.lines() {
            Ok(lines) => lines
                .iter()
                .map(|line| {
                    let options = line.options_summary();
                    if options.is_empty() {
                        format!("{}× {}", line.quantity, line.name)
                    } else {
                        format!("{}× {} ({options})", line.quantity, line.name)
                    }
                })
                .collect(),
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "Unreadable order lines");
                Vec::new()
            }
        };

        Self {
            id: order.id,
            number: order.number(),
            customer_name: order.customer_name.clone(),
            phone: order.phone.clone(),
            items,
            total: order.total.to_string(),
            status: order.status.as_str(),
            status_label: order.status.label(),
            placed_at: format_time(order.created_at),
            advance_label: order.status.advance_label(),
        }
    }
}

fn format_time(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %H:%M").to_string()
}

/// Orders list page template.
#[derive(Template)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub nav: NavView,
    pub stats: OrderStats,
    pub orders: Vec<OrderView>,
    pub search: String,
    pub status_options: Vec<SelectOption>,
    pub date_options: Vec<SelectOption>,
    pub has_orders: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/orders", get(index))
        .route("/admin/orders/{id}/advance", post(advance))
}

fn status_options(selected: Option<OrderStatus>) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: "all",
        label: "All statuses",
        selected: selected.is_none(),
    }];
    options.extend(OrderStatus::ALL.into_iter().map(|status| SelectOption {
        value: status.as_str(),
        label: status.label(),
        selected: selected == Some(status),
    }));
    options
}

fn date_options(selected: DateFilter) -> Vec<SelectOption> {
    DateFilter::ALL
        .into_iter()
        .map(|filter| SelectOption {
            value: filter.as_str(),
            label: filter.label(),
            selected: filter == selected,
        })
        .collect()
}

/// Orders list page handler.
#[instrument(skip(account, state, session))]
pub async fn index(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let orders = OrderRepository::new(state.pool()).list(store.id).await?;

    let now = Utc::now();
    let filter = OrderFilter::from(&query);
    let views = filter
        .apply(&orders, now)
        .into_iter()
        .map(OrderView::new)
        .collect();

    let template = OrdersTemplate {
        stats: OrderStats::from_orders(&orders, now),
        orders: views,
        search: filter.search.clone(),
        status_options: status_options(filter.status),
        date_options: date_options(filter.date),
        has_orders: !orders.is_empty(),
        nav: NavView::new(&account, &store, &session, "/admin/orders").await,
    };
    Ok(render(&template))
}

/// Move an order to its next status.
#[instrument(skip(account, state, session))]
pub async fn advance(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let flash = match OrderRepository::new(state.pool()).advance(store.id, id).await {
        Ok(status) => Flash::success(
            "Order updated",
            format!("Order ORD-{:04} is now {}", id.as_i32(), status.label()),
        ),
        Err(RepositoryError::Conflict(message)) => Flash::error("Order not updated", message),
        Err(RepositoryError::NotFound(_)) => {
            Flash::error("Order not updated", "That order no longer exists")
        }
        Err(e) => return Err(e.into()),
    };

    Ok(redirect_with(&session, flash, "/admin/orders").await)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use foodia_core::{Money, StoreId};

    use super::*;

    #[test]
    fn test_order_view_lists_lines_and_next_action() {
        let order = Order {
            id: OrderId::new(7),
            store_id: StoreId::new(1),
            customer_name: "Maria Santos".to_string(),
            phone: "555-0100".to_string(),
            items_json: serde_json::json!([{
                "item_id": 1,
                "name": "Coxinha",
                "unit_price": "4.50",
                "quantity": 2,
                "options": [{"id": 3, "group_label": "Sauce", "name": "Spicy", "extra_cost": "0.50"}]
            }]),
            total: Money::from_cents(1000),
            status: OrderStatus::New,
            created_at: Utc::now(),
        };

        let view = OrderView::new(&order);
        assert_eq!(view.number, "ORD-0007");
        assert_eq!(view.items, vec!["2× Coxinha (Spicy)"]);
        assert_eq!(view.total, "$10.00");
        assert_eq!(view.advance_label, OrderStatus::New.advance_label());
    }

    #[test]
    fn test_select_options_mark_current_choice() {
        let options = status_options(Some(OrderStatus::Preparing));
        assert_eq!(options.len(), 4);
        assert!(!options[0].selected);
        assert!(options.iter().any(|o| o.value == "preparing" && o.selected));

        let dates = date_options(DateFilter::All);
        assert!(dates[0].selected);
    }
}
