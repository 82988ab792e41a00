//! Order list filtering and counters for the orders page.

use chrono::{DateTime, Days, Utc};
use serde::Deserialize;

use foodia_core::OrderStatus;
use foodia_core::models::Order;

/// Which days to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Yesterday,
}

impl DateFilter {
    /// Every choice, in dropdown order.
    pub const ALL: [Self; 3] = [Self::All, Self::Today, Self::Yesterday];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Yesterday => "yesterday",
        }
    }

    /// Dropdown label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All dates",
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
        }
    }

    fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str() == value)
            .unwrap_or_default()
    }

    /// Whether `created_at` falls on the selected UTC day relative to `now`.
    #[must_use]
    pub fn matches(self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let today = now.date_naive();
        let day = created_at.date_naive();
        match self {
            Self::All => true,
            Self::Today => day == today,
            Self::Yesterday => today.checked_sub_days(Days::new(1)) == Some(day),
        }
    }
}

/// Raw query string of the orders page.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
}

/// Parsed filters of the orders page. Unknown values mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub search: String,
    pub status: Option<OrderStatus>,
    pub date: DateFilter,
}

impl From<&OrdersQuery> for OrderFilter {
    fn from(query: &OrdersQuery) -> Self {
        Self {
            search: query.search.trim().to_owned(),
            status: query.status.parse().ok(),
            date: DateFilter::parse(&query.date),
        }
    }
}

impl OrderFilter {
    /// Whether an order passes every filter.
    ///
    /// Search matches the customer name (case-insensitive), the order number,
    /// or the phone number.
    #[must_use]
    pub fn matches(&self, order: &Order, now: DateTime<Utc>) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = search.is_empty()
            || order.customer_name.to_lowercase().contains(&search)
            || order.number().to_lowercase().contains(&search)
            || order.phone.contains(&search);

        matches_search
            && self.status.is_none_or(|status| order.status == status)
            && self.date.matches(order.created_at, now)
    }

    /// Orders passing the filter, in their original order.
    #[must_use]
    pub fn apply<'a>(&self, orders: &'a [Order], now: DateTime<Utc>) -> Vec<&'a Order> {
        orders.iter().filter(|order| self.matches(order, now)).collect()
    }
}

/// Counters shown above the order list. Always computed over every order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderStats {
    pub total: usize,
    pub today: usize,
    pub new: usize,
    pub preparing: usize,
    pub delivered: usize,
}

impl OrderStats {
    /// Count orders by status and by day.
    #[must_use]
    pub fn from_orders(orders: &[Order], now: DateTime<Utc>) -> Self {
        let count = |status| orders.iter().filter(|o| o.status == status).count();
        Self {
            total: orders.len(),
            today: orders
                .iter()
                .filter(|o| DateFilter::Today.matches(o.created_at, now))
                .count(),
            new: count(OrderStatus::New),
            preparing: count(OrderStatus::Preparing),
            delivered: count(OrderStatus::Delivered),
        }
    }
}
