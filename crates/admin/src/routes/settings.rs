//! Settings page: business information and account panels.

use askama::Template;
use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::flash::Flash;
use foodia_core::models::Store;
use foodia_core::plans::PlanTier;

use crate::db::StoreRepository;
use crate::error::AppError;
use crate::middleware::RequireAccount;
use crate::models::store_settings::BusinessForm;
use crate::state::AppState;

use super::builder::{LanguageChoice, language_choices};
use super::{NavView, current_store, redirect_with, render};

const SETTINGS: &str = "/admin/settings";

/// An on/off row in one of the settings panels.
#[derive(Debug, Clone, Copy)]
pub struct Toggle {
    pub label: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

const WHATSAPP_TOGGLES: [Toggle; 2] = [
    Toggle {
        label: "Auto Responses",
        description: "Automatically reply to common customer questions",
        enabled: true,
    },
    Toggle {
        label: "Order Notifications",
        description: "Send order status updates to customers",
        enabled: true,
    },
];

const NOTIFICATION_TOGGLES: [Toggle; 3] = [
    Toggle {
        label: "Email Notifications",
        description: "Receive new order alerts by email",
        enabled: true,
    },
    Toggle {
        label: "SMS Notifications",
        description: "Receive new order alerts by text message",
        enabled: false,
    },
    Toggle {
        label: "Daily Reports",
        description: "A summary of the day's sales every evening",
        enabled: true,
    },
];

/// Current subscription as shown in the billing panel.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub plan: &'static str,
    pub price: String,
    pub status: &'static str,
    pub next_billing: &'static str,
}

impl Subscription {
    fn current() -> Self {
        let tier = PlanTier::Starter;
        Self {
            plan: tier.name(),
            price: format!("{}/month", tier.monthly_price()),
            status: "Active",
            next_billing: "February 15, 2024",
        }
    }
}

/// Settings page template.
#[derive(Template)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub nav: NavView,
    pub store: Store,
    pub languages: Vec<LanguageChoice>,
    pub whatsapp: &'static [Toggle],
    pub notifications: &'static [Toggle],
    pub subscription: Subscription,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/admin/settings", get(index).post(save))
}

#[instrument(skip(account, state, session))]
pub async fn index(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
) -> Result<Html<String>, AppError> {
    let store = current_store(&state, &account).await?;

    let template = SettingsTemplate {
        languages: language_choices(store.language),
        whatsapp: &WHATSAPP_TOGGLES,
        notifications: &NOTIFICATION_TOGGLES,
        subscription: Subscription::current(),
        nav: NavView::new(&account, &store, &session, SETTINGS).await,
        store,
    };
    Ok(render(&template))
}

/// Save business information.
#[instrument(skip(account, state, session, form))]
pub async fn save(
    RequireAccount(account): RequireAccount,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<BusinessForm>,
) -> Result<Redirect, AppError> {
    let store = current_store(&state, &account).await?;

    let info = match form.validate() {
        Ok(info) => info,
        Err(e) => {
            return Ok(redirect_with(&session, Flash::error("Error", e.to_string()), SETTINGS).await);
        }
    };

    let flash = match StoreRepository::new(state.pool())
        .update_business(store.id, &info)
        .await
    {
        Ok(()) => Flash::success("Settings saved", "Business information updated"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to save settings");
            Flash::error("Error", "Failed to save settings")
        }
    };
    Ok(redirect_with(&session, flash, SETTINGS).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_is_starter() {
        let subscription = Subscription::current();
        assert_eq!(subscription.plan, "Starter");
        assert_eq!(subscription.price, "$20.00/month");
    }

    #[test]
    fn test_sms_is_off_by_default() {
        let sms = NOTIFICATION_TOGGLES
            .iter()
            .find(|t| t.label == "SMS Notifications");
        assert!(sms.is_some_and(|t| !t.enabled));
    }
}
