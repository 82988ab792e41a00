//! Dashboard figures.
//!
//! The key metrics are computed from the store's rows. The charts, top
//! products, and activity feed are fixed sample data.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use foodia_core::Money;
use foodia_core::models::Order;

/// Orders and revenue of one weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySales {
    pub day: &'static str,
    pub orders: u32,
    pub revenue: Money,
}

/// Revenue of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRevenue {
    pub month: &'static str,
    pub revenue: Money,
}

/// A best-selling product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProduct {
    pub name: &'static str,
    pub orders: u32,
    pub revenue: Money,
}

/// Kind of activity feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    NewOrder,
    Delivered,
    NewCustomer,
    Preparing,
}

impl ActivityKind {
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::NewOrder => "activity activity-new",
            Self::Delivered => "activity activity-delivered",
            Self::NewCustomer => "activity activity-customer",
            Self::Preparing => "activity activity-preparing",
        }
    }
}

/// One activity feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub message: &'static str,
    pub time: &'static str,
    pub amount: Option<Money>,
    pub kind: ActivityKind,
}

/// Sample weekly sales, Monday first.
#[must_use]
pub fn weekly_sales() -> Vec<DailySales> {
    [
        ("Mon", 12, 245),
        ("Tue", 19, 389),
        ("Wed", 15, 301),
        ("Thu", 22, 445),
        ("Fri", 28, 567),
        ("Sat", 35, 712),
        ("Sun", 31, 634),
    ]
    .into_iter()
    .map(|(day, orders, dollars)| DailySales {
        day,
        orders,
        revenue: Money::from_cents(dollars * 100),
    })
    .collect()
}

/// Sample monthly revenue, January to June.
#[must_use]
pub fn monthly_revenue() -> Vec<MonthlyRevenue> {
    [
        ("Jan", 4200),
        ("Feb", 3800),
        ("Mar", 5100),
        ("Apr", 4900),
        ("May", 6200),
        ("Jun", 7100),
    ]
    .into_iter()
    .map(|(month, dollars)| MonthlyRevenue {
        month,
        revenue: Money::from_cents(dollars * 100),
    })
    .collect()
}

/// Sample best sellers.
#[must_use]
pub fn top_products() -> Vec<TopProduct> {
    vec![
        TopProduct {
            name: "Coxinha de Frango",
            orders: 89,
            revenue: Money::from_cents(40_050),
        },
        TopProduct {
            name: "Açaí Bowl",
            orders: 67,
            revenue: Money::from_cents(60_233),
        },
        TopProduct {
            name: "Feijoada Completa",
            orders: 45,
            revenue: Money::from_cents(76_455),
        },
        TopProduct {
            name: "Brigadeiro Box",
            orders: 34,
            revenue: Money::from_cents(40_800),
        },
    ]
}

/// Sample activity feed, newest first.
#[must_use]
pub fn recent_activity() -> Vec<Activity> {
    vec![
        Activity {
            message: "New order from Maria Santos",
            time: "2 minutes ago",
            amount: Some(Money::from_cents(2450)),
            kind: ActivityKind::NewOrder,
        },
        Activity {
            message: "Order #1234 delivered to João Silva",
            time: "15 minutes ago",
            amount: Some(Money::from_cents(3125)),
            kind: ActivityKind::Delivered,
        },
        Activity {
            message: "New customer registered: Ana Costa",
            time: "1 hour ago",
            amount: None,
            kind: ActivityKind::NewCustomer,
        },
        Activity {
            message: "Order #1231 prepared",
            time: "2 hours ago",
            amount: Some(Money::from_cents(1875)),
            kind: ActivityKind::Preparing,
        },
    ]
}

/// Bar height in percent of the tallest bar, at least 1 for non-zero values.
#[must_use]
pub fn bar_percent(value: Money, max: Money) -> u32 {
    if !max.is_positive() {
        return 0;
    }
    let ratio = value.amount() * Decimal::from(100) / max.amount();
    let percent = ratio.round().to_u32().unwrap_or(0);
    if value.is_positive() { percent.max(1) } else { 0 }
}

/// Live counters for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMetrics {
    pub orders: usize,
    pub revenue: Money,
    pub customers: usize,
    pub menu_items: usize,
}

impl KeyMetrics {
    /// Compute from the store's rows.
    #[must_use]
    pub fn new(orders: &[Order], customers: usize, menu_items: usize) -> Self {
        Self {
            orders: orders.len(),
            revenue: orders.iter().map(|order| order.total).sum(),
            customers,
            menu_items,
        }
    }
}
