//! Customers page.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::CustomerSegment;

use crate::db::{CustomerRepository, OrderRepository};
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::models::customers::{
    CustomerFilter, CustomerStats, CustomerSummary, CustomersQuery, summarize, top_spenders,
};
use crate::state::AppState;

use super::orders::SelectOption;
use super::{NavView, current_store, render};

/// A customer row.
#[derive(Debug, Clone)]
pub struct CustomerView {
    pub name: String,
    pub phone: String,
    pub order_count: usize,
    pub total_spent: String,
    pub average_order: String,
    pub segment: &'static str,
    pub segment_label: &'static str,
    pub favourite_items: Vec<String>,
    pub last_order: String,
}

impl From<&CustomerSummary> for CustomerView {
    fn from(summary: &CustomerSummary) -> Self {
        Self {
            name: summary.customer.name.clone(),
            phone: summary.customer.phone.clone(),
            order_count: summary.order_count,
            total_spent: summary.total_spent.to_string(),
            average_order: summary.average_order().to_string(),
            segment: summary.segment.as_str(),
            segment_label: summary.segment.label(),
            favourite_items: summary.favourite_items.clone(),
            last_order: summary
                .customer
                .last_order_at
                .map_or_else(|| "Never".to_owned(), |at| at.format("%b %-d, %Y").to_string()),
        }
    }
}

/// Customers page template.
#[derive(Template)]
#[template(path = "customers.html")]
pub struct CustomersTemplate {
    pub nav: NavView,
    pub stats: CustomerStats,
    pub customers: Vec<CustomerView>,
    pub top_spenders: Vec<CustomerView>,
    pub search: String,
    pub segment_options: Vec<SelectOption>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/customers", get(index))
}

fn segment_options(selected: Option<CustomerSegment>) -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        value: "all",
        label: "All segments",
        selected: selected.is_none(),
    }];
    options.extend(CustomerSegment::ALL.into_iter().map(|segment| SelectOption {
        value: segment.as_str(),
        label: segment.label(),
        selected: selected == Some(segment),
    }));
    options
}

#[instrument(skip(account, state, session))]
pub async fn index(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CustomersQuery>,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let customers = CustomerRepository::new(state.pool()).list(store.id).await?;
    let orders = OrderRepository::new(state.pool()).list(store.id).await?;

    let now = Utc::now();
    let summaries = summarize(customers, &orders, now);
    let filter = CustomerFilter::from(&query);

    let template = CustomersTemplate {
        stats: CustomerStats::from_summaries(&summaries, now),
        customers: filter
            .apply(&summaries)
            .into_iter()
            .map(CustomerView::from)
            .collect(),
        top_spenders: top_spenders(&summaries)
            .into_iter()
            .map(CustomerView::from)
            .collect(),
        search: filter.search.clone(),
        segment_options: segment_options(filter.segment),
        nav: NavView::new(&account, &store, &session, "/admin/customers").await,
    };
    Ok(render(&template))
}
