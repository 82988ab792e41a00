//! Sign-in and sign-up routes.
//!
//! Both forms live on `/auth`. A `?plan=` chosen on the landing page is
//! carried through sign-up and shown as a banner.

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use foodia_core::flash::Flash;
use foodia_core::plans::PlanTier;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAccount, auth_rate_limiter};
use crate::models::session::take_flash;
use crate::models::{Account, CurrentAccount, session_keys};
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

use super::{redirect_with, render};

/// Where a fresh account lands.
const AFTER_REGISTER: &str = "/admin/menu-builder";

/// Plan banner on the sign-up form.
#[derive(Debug, Clone)]
pub struct PlanChoice {
    pub slug: &'static str,
    pub name: &'static str,
    pub price: String,
}

impl From<PlanTier> for PlanChoice {
    fn from(tier: PlanTier) -> Self {
        Self {
            slug: tier.as_str(),
            name: tier.name(),
            price: tier.monthly_price().to_string(),
        }
    }
}

/// Sign-in / sign-up page template.
#[derive(Template)]
#[template(path = "auth.html")]
pub struct AuthTemplate {
    pub plan: Option<PlanChoice>,
    pub flash: Option<Flash>,
    pub min_password_length: usize,
}

#[derive(Debug, Deserialize)]
pub struct AuthQuery {
    pub plan: Option<String>,
}

/// Posted by both forms.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub plan: String,
}

/// Build the auth router. Login and register are rate limited per IP.
pub fn router() -> Router<AppState> {
    let mut limited = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register));

    if let Some(limiter) = auth_rate_limiter() {
        limited = limited.layer(limiter);
    } else {
        tracing::warn!("Auth rate limiter unavailable; sign-in is not rate limited");
    }

    Router::new()
        .route("/auth", get(auth_page))
        .route("/auth/logout", post(logout))
        .merge(limited)
}

fn parse_plan(plan: &str) -> Option<PlanTier> {
    plan.parse().ok()
}

fn auth_url(plan: Option<PlanTier>) -> String {
    plan.map_or_else(
        || "/auth".to_string(),
        |tier| format!("/auth?plan={}", tier.as_str()),
    )
}

/// Store the account in a fresh session.
async fn sign_in(session: &Session, account: &Account) -> Result<(), AppError> {
    // New session id on privilege change
    session.cycle_id().await?;
    session
        .insert(
            session_keys::CURRENT_ACCOUNT,
            CurrentAccount {
                id: account.id,
                email: account.email.clone(),
            },
        )
        .await?;
    set_sentry_user(account.id, account.email.as_str());
    Ok(())
}

/// Flash for a failed attempt. Server-side failures get a generic message.
fn failure_flash(title: &str, error: &AuthError) -> Flash {
    if error.is_user_facing() {
        Flash::error(title, error.to_string())
    } else {
        tracing::error!(error = %error, "Authentication failed");
        Flash::error(title, "Something went wrong, please try again")
    }
}

/// Display the sign-in / sign-up page.
#[instrument(skip(session))]
pub async fn auth_page(
    OptionalAccount(account): OptionalAccount,
    session: Session,
    Query(query): Query<AuthQuery>,
) -> Response {
    if account.is_some() {
        return Redirect::to("/admin").into_response();
    }

    let template = AuthTemplate {
        plan: query.plan.as_deref().and_then(parse_plan).map(PlanChoice::from),
        flash: take_flash(&session).await,
        min_password_length: crate::services::auth::MIN_PASSWORD_LENGTH,
    };
    render(&template).into_response()
}

/// Sign in with email and password.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    match AuthService::new(state.pool())
        .login(&form.email, &form.password)
        .await
    {
        Ok(account) => {
            sign_in(&session, &account).await?;
            tracing::info!(account_id = %account.id, "Signed in");
            Ok(Redirect::to("/admin"))
        }
        Err(e) => {
            let flash = failure_flash("Sign in failed", &e);
            Ok(redirect_with(&session, flash, &auth_url(parse_plan(&form.plan))).await)
        }
    }
}

/// Create an account and sign straight in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect, AppError> {
    let plan = parse_plan(&form.plan);

    match AuthService::new(state.pool())
        .register(&form.email, &form.password)
        .await
    {
        Ok(account) => {
            sign_in(&session, &account).await?;
            let welcome = plan.map_or_else(
                || "Let's set up your store".to_string(),
                |tier| format!("You're on the {} plan. Let's set up your store", tier.name()),
            );
            Ok(redirect_with(&session, Flash::success("Account created!", welcome), AFTER_REGISTER).await)
        }
        Err(e) => {
            let flash = failure_flash("Sign up failed", &e);
            Ok(redirect_with(&session, flash, &auth_url(plan)).await)
        }
    }
}

/// Sign out and drop the session.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    session.flush().await?;
    clear_sentry_user();
    Ok(Redirect::to("/auth"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_url_keeps_plan() {
        assert_eq!(auth_url(None), "/auth");
        assert_eq!(auth_url(parse_plan("growth")), "/auth?plan=growth");
        assert_eq!(auth_url(parse_plan("platinum")), "/auth");
    }

    #[test]
    fn test_plan_choice_shows_price() {
        let choice = PlanChoice::from(PlanTier::Starter);
        assert_eq!(choice.slug, "starter");
        assert!(choice.price.starts_with('$'));
    }
}
