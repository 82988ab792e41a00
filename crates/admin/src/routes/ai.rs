//! AI page: canned insights and customer campaigns.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::CustomerSegment;
use foodia_core::flash::Flash;
use foodia_core::models::Store;

use crate::db::{CustomerRepository, OrderRepository};
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::models::customers::{CustomerStats, summarize};
use crate::services::CampaignLauncher;
use crate::services::campaigns::{Audience, Campaign, CampaignError, TEMPLATES};
use crate::services::insights::{
    CampaignResult, INSIGHTS, Insight, MESSAGE_TIPS, PERFORMANCE, PerformanceMetric,
    campaign_results,
};
use crate::state::AppState;

use super::orders::SelectOption;
use super::{NavView, current_store, redirect_with, render};

const AI: &str = "/admin/ai";

/// A campaign template card with its audience size.
#[derive(Debug, Clone)]
pub struct TemplateCard {
    pub id: &'static str,
    pub name: &'static str,
    pub message: &'static str,
    pub audience: &'static str,
    pub reach: usize,
}

/// AI page template.
#[derive(Template)]
#[template(path = "ai.html")]
pub struct AiTemplate {
    pub nav: NavView,
    pub insights: &'static [Insight],
    pub performance: &'static [PerformanceMetric],
    pub templates: Vec<TemplateCard>,
    pub audience_options: Vec<SelectOption>,
    pub tips: &'static [&'static str],
    pub results: Vec<CampaignResult>,
}

/// Custom campaign form.
#[derive(Debug, Deserialize)]
pub struct CustomCampaignForm {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub audience: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/ai", get(index))
        .route("/admin/ai/campaigns/custom", post(launch_custom))
        .route("/admin/ai/campaigns/{id}/launch", post(launch_template))
}

fn audience_options() -> Vec<SelectOption> {
    std::iter::once(Audience::AllCustomers)
        .chain(CustomerSegment::ALL.into_iter().map(Audience::Segment))
        .map(|audience| SelectOption {
            value: audience.as_str(),
            label: audience.label(),
            selected: audience == Audience::AllCustomers,
        })
        .collect()
}

fn template_cards(stats: &CustomerStats) -> Vec<TemplateCard> {
    TEMPLATES
        .iter()
        .map(|template| TemplateCard {
            id: template.id,
            name: template.name,
            message: template.message,
            audience: template.audience.label(),
            reach: template.audience.reach(stats),
        })
        .collect()
}

async fn customer_stats(state: &AppState, store: &Store) -> Result<CustomerStats, AppError> {
    let customers = CustomerRepository::new(state.pool()).list(store.id).await?;
    let orders = OrderRepository::new(state.pool()).list(store.id).await?;
    let now = Utc::now();
    Ok(CustomerStats::from_summaries(
        &summarize(customers, &orders, now),
        now,
    ))
}

/// Send a campaign and turn the outcome into a notice.
async fn launch<L: CampaignLauncher>(
    launcher: &L,
    campaign: Result<Campaign, CampaignError>,
    stats: &CustomerStats,
) -> Flash {
    let campaign = match campaign {
        Ok(campaign) => campaign,
        Err(e) => return Flash::error("Error", e.to_string()),
    };

    match launcher.launch(&campaign, campaign.audience.reach(stats)).await {
        Ok(report) => Flash::success("Campaign launched!", report.message()),
        Err(e) => {
            tracing::error!(error = %e, campaign = %campaign.name, "Campaign launch failed");
            Flash::error("Error", "Failed to launch campaign")
        }
    }
}

#[instrument(skip(account, state, session))]
pub async fn index(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;
    let stats = customer_stats(&state, &store).await?;

    let template = AiTemplate {
        insights: &INSIGHTS,
        performance: &PERFORMANCE,
        templates: template_cards(&stats),
        audience_options: audience_options(),
        tips: &MESSAGE_TIPS,
        results: campaign_results(),
        nav: NavView::new(&account, &store, &session, AI).await,
    };
    Ok(render(&template))
}

/// Launch one of the ready-made campaigns.
#[instrument(skip(account, state, session))]
pub async fn launch_template(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;
    let stats = customer_stats(&state, &store).await?;

    let flash = launch(state.launcher(), Campaign::from_template(&id), &stats).await;
    Ok(redirect_with(&session, flash, AI).await)
}

/// Launch a message written on the page.
#[instrument(skip(account, state, session, form))]
pub async fn launch_custom(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CustomCampaignForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;
    let stats = customer_stats(&state, &store).await?;

    let campaign = Campaign::custom(&form.message, Audience::parse(&form.audience));
    let flash = launch(state.launcher(), campaign, &stats).await;
    Ok(redirect_with(&session, flash, AI).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use foodia_core::Money;

    use super::*;
    use crate::services::campaigns::{CUSTOM_CAMPAIGN_NAME, LaunchReport};

    fn stats() -> CustomerStats {
        CustomerStats {
            total: 20,
            new: 5,
            active: 12,
            vip: 3,
            revenue: Money::from_cents(150_000),
            average_order_value: Money::from_cents(2_500),
            active_this_month: 9,
            repeat_customers: 6,
            repeat_rate: 30,
        }
    }

    struct FailingLauncher;

    impl CampaignLauncher for FailingLauncher {
        async fn launch(
            &self,
            _campaign: &Campaign,
            _recipients: usize,
        ) -> Result<LaunchReport, CampaignError> {
            Err(CampaignError::EmptyMessage)
        }
    }

    #[test]
    fn test_template_cards_show_reach() {
        let cards = template_cards(&stats());
        let reach: Vec<usize> = cards.iter().map(|c| c.reach).collect();
        assert_eq!(reach, vec![20, 3, 5]);
    }

    #[tokio::test]
    async fn test_launch_reports_recipients() {
        let launcher = crate::services::SimulatedLauncher::new(Duration::ZERO);
        let flash = launch(&launcher, Campaign::from_template("vip-appreciation"), &stats()).await;
        assert!(!flash.is_error());
        assert_eq!(
            flash.message,
            "Campaign \"VIP Customer Appreciation\" launched to 3 customers!"
        );

        let custom = Campaign::custom("Feijoada Friday!", Audience::parse("all"));
        let flash = launch(&launcher, custom, &stats()).await;
        assert!(flash.message.contains(CUSTOM_CAMPAIGN_NAME));
        assert!(flash.message.contains("20 customers"));
    }

    #[tokio::test]
    async fn test_blank_message_is_refused() {
        let launcher = crate::services::SimulatedLauncher::new(Duration::ZERO);
        let flash = launch(&launcher, Campaign::custom("   ", Audience::AllCustomers), &stats()).await;
        assert!(flash.is_error());
        assert_eq!(flash.message, "Please enter a campaign message");
    }

    #[tokio::test]
    async fn test_launcher_failure_is_generic() {
        let flash = launch(&FailingLauncher, Campaign::from_template("weekend-special"), &stats()).await;
        assert!(flash.is_error());
        assert_eq!(flash.message, "Failed to launch campaign");
    }
}
