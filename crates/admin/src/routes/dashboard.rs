//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{CustomerRepository, MenuRepository, OrderRepository};
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::services::analytics::{self, Activity, KeyMetrics, TopProduct, bar_percent};
use crate::state::AppState;

use super::{NavView, current_store, render, share_url};

/// One bar of a chart.
#[derive(Debug, Clone)]
pub struct BarView {
    pub label: &'static str,
    pub value: String,
    pub detail: Option<String>,
    pub percent: u32,
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: NavView,
    pub metrics: KeyMetrics,
    pub orders_today: usize,
    pub weekly: Vec<BarView>,
    pub monthly: Vec<BarView>,
    pub top_products: Vec<TopProduct>,
    pub activity: Vec<Activity>,
    pub share_url: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin", get(dashboard))
}

fn weekly_bars() -> Vec<BarView> {
    let days = analytics::weekly_sales();
    let max = days.iter().map(|d| d.revenue).max().unwrap_or_default();
    days.into_iter()
        .map(|d| BarView {
            label: d.day,
            value: d.revenue.to_string(),
            detail: Some(format!("{} orders", d.orders)),
            percent: bar_percent(d.revenue, max),
        })
        .collect()
}

fn monthly_bars() -> Vec<BarView> {
    let months = analytics::monthly_revenue();
    let max = months.iter().map(|m| m.revenue).max().unwrap_or_default();
    months
        .into_iter()
        .map(|m| BarView {
            label: m.month,
            value: m.revenue.to_string(),
            detail: None,
            percent: bar_percent(m.revenue, max),
        })
        .collect()
}

/// Dashboard overview.
#[instrument(skip(account, state, session))]
pub async fn dashboard(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let orders = OrderRepository::new(state.pool()).list(store.id).await?;
    let customers = CustomerRepository::new(state.pool()).list(store.id).await?;
    let menu = MenuRepository::new(state.pool()).load(store.id).await?;

    let now = Utc::now();
    let orders_today = orders
        .iter()
        .filter(|o| o.created_at.date_naive() == now.date_naive())
        .count();

    let share_url = store
        .store_url
        .as_ref()
        .filter(|_| store.is_published)
        .map(|slug| share_url(&state.config().storefront_base_url, slug));

    let template = DashboardTemplate {
        metrics: KeyMetrics::new(&orders, customers.len(), menu.items.len()),
        orders_today,
        weekly: weekly_bars(),
        monthly: monthly_bars(),
        top_products: analytics::top_products(),
        activity: analytics::recent_activity(),
        share_url,
        nav: NavView::new(&account, &store, &session, "/admin").await,
    };
    Ok(render(&template))
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_busiest_day_fills_the_chart() {
        let bars = weekly_bars();
        assert_eq!(bars.len(), 7);
        assert_eq!(bars[5].label, "Sat");
        assert_eq!(bars[5].percent, 100);
        assert_eq!(bars[5].detail.as_deref(), Some("35 orders"));
        assert!(bars[0].percent < bars[5].percent);
    }

    #[test]
    fn test_monthly_peak_is_june() {
        let bars = monthly_bars();
        assert_eq!(bars.last().map(|b| b.percent), Some(100));
        assert_eq!(bars[0].value, "$4200.00");
    }
}
