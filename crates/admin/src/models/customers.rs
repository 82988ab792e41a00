//! Customer aggregation for the customers page and campaign reach.
//!
//! Customers are stored once per `(phone, store)`. Their order count, spend,
//! and favourite dishes are derived here from the store's orders, matched by
//! phone number.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use foodia_core::models::{Customer, Order};
use foodia_core::{CustomerSegment, Money};

/// Orders needed for VIP status.
pub const VIP_MIN_ORDERS: usize = 40;

/// Spend needed for VIP status, in cents.
pub const VIP_MIN_SPEND_CENTS: i64 = 80_000;

/// A customer counts as new for this many days after their first order.
pub const NEW_CUSTOMER_DAYS: i64 = 30;

/// A repeat customer has strictly more orders than this.
pub const REPEAT_MIN_ORDERS: usize = 5;

/// Favourite items shown per customer.
const FAVOURITES_SHOWN: usize = 3;

/// Customers shown in the top spenders list.
const TOP_SHOWN: usize = 5;

/// A customer together with their order history totals.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerSummary {
    pub customer: Customer,
    pub order_count: usize,
    pub total_spent: Money,
    pub segment: CustomerSegment,
    pub favourite_items: Vec<String>,
}

impl CustomerSummary {
    /// Aggregate `orders` (all of the store's) for one customer.
    #[must_use]
    pub fn new(customer: Customer, orders: &[Order], now: DateTime<Utc>) -> Self {
        let own: Vec<&Order> = orders.iter().filter(|o| o.phone == customer.phone).collect();
        let order_count = own.len();
        let total_spent: Money = own.iter().map(|o| o.total).sum();
        let segment = segment_for(order_count, total_spent, customer.created_at, now);

        Self {
            favourite_items: favourite_items(&own),
            customer,
            order_count,
            total_spent,
            segment,
        }
    }

    /// Average spend per order, zero without orders.
    #[must_use]
    pub fn average_order(&self) -> Money {
        self.total_spent.average_over(self.order_count)
    }

    /// Whether the customer ordered within the last 30 days.
    #[must_use]
    pub fn ordered_recently(&self, now: DateTime<Utc>) -> bool {
        self.customer
            .last_order_at
            .is_some_and(|at| now - at <= Duration::days(NEW_CUSTOMER_DAYS))
    }
}

/// Decide a customer's segment. VIP wins over new.
#[must_use]
pub fn segment_for(
    order_count: usize,
    total_spent: Money,
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> CustomerSegment {
    if order_count >= VIP_MIN_ORDERS || total_spent >= Money::from_cents(VIP_MIN_SPEND_CENTS) {
        CustomerSegment::Vip
    } else if now - created_at <= Duration::days(NEW_CUSTOMER_DAYS) {
        CustomerSegment::New
    } else {
        CustomerSegment::Active
    }
}

fn favourite_items(orders: &[&Order]) -> Vec<String> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for order in orders {
        // Unreadable history just contributes nothing
        for line in order.lines().unwrap_or_default() {
            *counts.entry(line.name).or_default() += line.quantity;
        }
    }
    let mut ranked: Vec<(String, u32)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(FAVOURITES_SHOWN)
        .map(|(name, _)| name)
        .collect()
}

/// Summarize every customer of a store, most recent orderers first.
#[must_use]
pub fn summarize(customers: Vec<Customer>, orders: &[Order], now: DateTime<Utc>) -> Vec<CustomerSummary> {
    let mut summaries: Vec<CustomerSummary> = customers
        .into_iter()
        .map(|customer| CustomerSummary::new(customer, orders, now))
        .collect();
    summaries.sort_by(|a, b| b.customer.last_order_at.cmp(&a.customer.last_order_at));
    summaries
}

/// Raw query string of the customers page.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub segment: String,
}

/// Parsed customer filters. Unknown segments mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub search: String,
    pub segment: Option<CustomerSegment>,
}

impl From<&CustomersQuery> for CustomerFilter {
    fn from(query: &CustomersQuery) -> Self {
        Self {
            search: query.search.trim().to_owned(),
            segment: query.segment.parse().ok(),
        }
    }
}

impl CustomerFilter {
    /// Customers whose name or phone contains the search text and whose
    /// segment matches.
    #[must_use]
    pub fn apply<'a>(&self, summaries: &'a [CustomerSummary]) -> Vec<&'a CustomerSummary> {
        let search = self.search.to_lowercase();
        summaries
            .iter()
            .filter(|s| {
                search.is_empty()
                    || s.customer.name.to_lowercase().contains(&search)
                    || s.customer.phone.contains(&search)
            })
            .filter(|s| self.segment.is_none_or(|segment| s.segment == segment))
            .collect()
    }
}

/// Counters shown above the customer list.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerStats {
    pub total: usize,
    pub new: usize,
    pub active: usize,
    pub vip: usize,
    pub revenue: Money,
    pub average_order_value: Money,
    pub active_this_month: usize,
    pub repeat_customers: usize,
    pub repeat_rate: u32,
}

impl CustomerStats {
    /// Aggregate over every customer of the store.
    ///
    /// The average order value is the mean of each customer's own average,
    /// counting only customers with at least one order.
    #[must_use]
    pub fn from_summaries(summaries: &[CustomerSummary], now: DateTime<Utc>) -> Self {
        let count = |segment| summaries.iter().filter(|s| s.segment == segment).count();
        let ordering: Vec<&CustomerSummary> =
            summaries.iter().filter(|s| s.order_count > 0).collect();
        let per_customer: Money = ordering.iter().map(|s| s.average_order()).sum();
        let repeat_customers = summaries
            .iter()
            .filter(|s| s.order_count > REPEAT_MIN_ORDERS)
            .count();

        Self {
            total: summaries.len(),
            new: count(CustomerSegment::New),
            active: count(CustomerSegment::Active),
            vip: count(CustomerSegment::Vip),
            revenue: summaries.iter().map(|s| s.total_spent).sum(),
            average_order_value: per_customer.average_over(ordering.len()),
            active_this_month: summaries.iter().filter(|s| s.ordered_recently(now)).count(),
            repeat_customers,
            repeat_rate: percent(repeat_customers, summaries.len()),
        }
    }

    /// Customers in a segment, used as campaign reach.
    #[must_use]
    pub const fn in_segment(&self, segment: CustomerSegment) -> usize {
        match segment {
            CustomerSegment::New => self.new,
            CustomerSegment::Active => self.active,
            CustomerSegment::Vip => self.vip,
        }
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    u32::try_from(part * 100 / whole).unwrap_or(100)
}

/// The biggest spenders, highest first.
#[must_use]
pub fn top_spenders(summaries: &[CustomerSummary]) -> Vec<&CustomerSummary> {
    let mut ranked: Vec<&CustomerSummary> = summaries.iter().collect();
    ranked.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    ranked.truncate(TOP_SHOWN);
    ranked
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use chrono::TimeZone;
    use foodia_core::{CustomerId, OrderId, OrderStatus, StoreId};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0)
            .single()
            .unwrap_or_default()
    }

    fn customer(id: i32, name: &str, phone: &str, age_days: i64) -> Customer {
        Customer {
            id: CustomerId::new(id),
            store_id: StoreId::new(1),
            name: name.to_owned(),
            phone: phone.to_owned(),
            created_at: now() - Duration::days(age_days),
            last_order_at: Some(now() - Duration::days(age_days.min(3))),
        }
    }

    fn order(id: i32, phone: &str, cents: i64, items: serde_json::Value) -> Order {
        Order {
            id: OrderId::new(id),
            store_id: StoreId::new(1),
            customer_name: String::new(),
            phone: phone.to_owned(),
            items_json: items,
            total: Money::from_cents(cents),
            status: OrderStatus::Delivered,
            created_at: now(),
        }
    }

    fn line(name: &str, quantity: u32) -> serde_json::Value {
        serde_json::json!({
            "item_id": 1,
            "name": name,
            "unit_price": "1.00",
            "quantity": quantity,
            "options": []
        })
    }

    #[test]
    fn test_segments() {
        let recent = now() - Duration::days(10);
        let old = now() - Duration::days(90);

        assert_eq!(segment_for(1, Money::from_cents(2000), recent, now()), CustomerSegment::New);
        assert_eq!(segment_for(6, Money::from_cents(9000), old, now()), CustomerSegment::Active);
        assert_eq!(segment_for(40, Money::from_cents(100), recent, now()), CustomerSegment::Vip);
        assert_eq!(segment_for(3, Money::from_cents(80_000), old, now()), CustomerSegment::Vip);
    }

    #[test]
    fn test_summary_matches_orders_by_phone() {
        let orders = vec![
            order(1, "555-0001", 1000, serde_json::json!([line("Coxinha", 2)])),
            order(2, "555-0001", 3000, serde_json::json!([line("Açaí Bowl", 1), line("Coxinha", 1)])),
            order(3, "555-0002", 500, serde_json::json!([line("Brigadeiro", 1)])),
        ];
        let summary = CustomerSummary::new(customer(1, "Maria", "555-0001", 60), &orders, now());

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.total_spent, Money::from_cents(4000));
        assert_eq!(summary.average_order(), Money::from_cents(2000));
        assert_eq!(summary.segment, CustomerSegment::Active);
        assert_eq!(summary.favourite_items, vec!["Coxinha", "Açaí Bowl"]);
    }

    #[test]
    fn test_filter_by_search_and_segment() {
        let summaries = summarize(
            vec![
                customer(1, "Maria Santos", "555-0001", 5),
                customer(2, "João Silva", "555-0002", 90),
            ],
            &[],
            now(),
        );

        let filter = CustomerFilter::from(&CustomersQuery {
            search: "silva".to_owned(),
            segment: String::new(),
        });
        let found = filter.apply(&summaries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].customer.name, "João Silva");

        let filter = CustomerFilter::from(&CustomersQuery {
            search: String::new(),
            segment: "new".to_owned(),
        });
        let found = filter.apply(&summaries);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].customer.name, "Maria Santos");
    }

    #[test]
    fn test_stats_and_top_spenders() {
        let mut orders: Vec<Order> = (1..=6)
            .map(|id| order(id, "555-0001", 1000, serde_json::json!([])))
            .collect();
        orders.push(order(7, "555-0002", 4000, serde_json::json!([])));

        let summaries = summarize(
            vec![
                customer(1, "Maria", "555-0001", 90),
                customer(2, "João", "555-0002", 90),
                customer(3, "Ana", "555-0003", 2),
            ],
            &orders,
            now(),
        );
        let stats = CustomerStats::from_summaries(&summaries, now());

        assert_eq!(stats.total, 3);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.vip, 0);
        assert_eq!(stats.revenue, Money::from_cents(10_000));
        // Mean of 10.00 and 40.00; Ana has no orders
        assert_eq!(stats.average_order_value, Money::from_cents(2500));
        assert_eq!(stats.repeat_customers, 1);
        assert_eq!(stats.repeat_rate, 33);
        assert_eq!(stats.in_segment(CustomerSegment::Active), 2);

        let top = top_spenders(&summaries);
        assert_eq!(top[0].customer.name, "Maria");
        assert_eq!(top[1].customer.name, "João");
    }

    #[test]
    fn test_empty_store_stats() {
        let stats = CustomerStats::from_summaries(&[], now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.repeat_rate, 0);
        assert_eq!(stats.average_order_value, Money::ZERO);
    }
}
