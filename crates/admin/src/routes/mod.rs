//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                   - Redirect to the dashboard
//!
//! # Auth
//! GET  /auth                               - Sign-in / sign-up page (?plan=)
//! POST /auth/login                         - Sign in (rate limited)
//! POST /auth/register                      - Create an account (rate limited)
//! POST /auth/logout                        - Sign out
//!
//! # Dashboard
//! GET  /admin                              - Key metrics and sample charts
//!
//! # Orders
//! GET  /admin/orders                       - Order list (?search&status&date)
//! POST /admin/orders/{id}/advance          - Move an order to its next status
//!
//! # Products
//! GET  /admin/products                     - Product list (?category)
//! POST /admin/products                     - Add a product
//! GET  /admin/products/{id}/edit           - Edit form
//! POST /admin/products/{id}                - Update a product
//! POST /admin/products/{id}/toggle         - Switch availability
//! POST /admin/products/{id}/delete         - Delete a product
//!
//! # Customers
//! GET  /admin/customers                    - Customer list (?search&segment)
//!
//! # AI
//! GET  /admin/ai                           - Insights and campaigns
//! POST /admin/ai/campaigns/{id}/launch     - Launch a template campaign
//! POST /admin/ai/campaigns/custom          - Launch a custom message
//!
//! # Store builder
//! GET  /admin/menu-builder                 - Builder with live preview
//! POST /admin/menu-builder/store           - Save store configuration
//! POST /admin/menu-builder/categories      - Add a category
//! POST /admin/menu-builder/categories/{id} - Rename a category
//! POST /admin/menu-builder/categories/{id}/delete
//! POST /admin/menu-builder/items           - Add an item
//! POST /admin/menu-builder/items/{id}      - Update an item
//! POST /admin/menu-builder/items/{id}/delete
//! POST /admin/menu-builder/items/{id}/options - Add a custom option
//! POST /admin/menu-builder/options/{id}/delete
//! POST /admin/menu-builder/publish         - Publish the store
//! POST /admin/menu-builder/unpublish       - Take the store offline
//!
//! # Settings
//! GET  /admin/settings                     - Business information and panels
//! POST /admin/settings                     - Save business information
//! ```

pub mod ai;
pub mod auth;
pub mod builder;
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod settings;

use askama::Template;
use axum::{
    Router,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tower_sessions::Session;

use foodia_core::StoreSlug;
use foodia_core::flash::Flash;
use foodia_core::models::Store;

use crate::db::StoreRepository;
use crate::error::AppError;
use crate::models::CurrentAccount;
use crate::models::session::{set_flash, take_flash};
use crate::state::AppState;

/// Sidebar and toast data shared by every signed-in page.
#[derive(Debug, Clone)]
pub struct NavView {
    pub email: String,
    pub store_name: String,
    pub current_path: &'static str,
    pub flash: Option<Flash>,
}

impl NavView {
    /// Build the navigation, taking the pending flash out of the session.
    pub async fn new(
        account: &CurrentAccount,
        store: &Store,
        session: &Session,
        current_path: &'static str,
    ) -> Self {
        Self {
            email: account.email.to_string(),
            store_name: store.name.clone(),
            current_path,
            flash: take_flash(session).await,
        }
    }

    /// Whether a sidebar link points at the current section.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        if path == "/admin" {
            self.current_path == path
        } else {
            self.current_path.starts_with(path)
        }
    }
}

/// Build the admin router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/admin") }))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(customers::router())
        .merge(ai::router())
        .merge(builder::router())
        .merge(settings::router())
        .fallback(not_found)
}

async fn not_found() -> Response {
    AppError::NotFound("The page you're looking for doesn't exist".to_string()).into_response()
}

/// Render a page, logging template failures.
pub(crate) fn render(template: &impl Template) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Template render error");
        "Internal Server Error".to_string()
    }))
}

/// The signed-in owner's store, created with defaults on first visit.
pub(crate) async fn current_store(
    state: &AppState,
    account: &CurrentAccount,
) -> Result<Store, AppError> {
    Ok(StoreRepository::new(state.pool())
        .get_or_create(account.id)
        .await?)
}

/// Queue a flash notice and redirect.
pub(crate) async fn redirect_with(session: &Session, flash: Flash, to: &str) -> Redirect {
    set_flash(session, flash).await;
    Redirect::to(to)
}

/// Public ordering link of a store on the storefront host.
#[must_use]
pub fn share_url(storefront_base_url: &str, slug: &StoreSlug) -> String {
    format!("{storefront_base_url}/order?store={slug}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use tower_sessions::{MemoryStore, SessionManagerLayer};

    use crate::config::AdminConfig;

    fn app() -> Router {
        let config = AdminConfig {
            database_url: SecretString::from("postgres://localhost/foodia_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            storefront_base_url: "http://localhost:3000".to_string(),
            campaign_launch_delay: Duration::ZERO,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        // Never connects: these routes stop before touching the database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/foodia_test")
            .unwrap();
        routes()
            .layer(SessionManagerLayer::new(MemoryStore::default()))
            .with_state(AppState::new(config, pool))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_redirects_to_dashboard() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/admin");
    }

    #[tokio::test]
    async fn test_admin_pages_require_sign_in() {
        for path in [
            "/admin",
            "/admin/orders",
            "/admin/products",
            "/admin/customers",
            "/admin/ai",
            "/admin/menu-builder",
            "/admin/settings",
        ] {
            let response = app()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
            assert_eq!(location(&response), "/auth", "{path}");
        }
    }

    #[tokio::test]
    async fn test_auth_page_shows_chosen_plan() {
        let response = app()
            .oneshot(Request::get("/auth?plan=pro").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Sign in"));
        assert!(html.contains("Pro"));
        assert!(html.contains("name=\"plan\" value=\"pro\""));
    }

    #[tokio::test]
    async fn test_short_password_is_rejected_before_the_database() {
        let response = app()
            .oneshot(
                Request::post("/auth/register")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header("x-forwarded-for", "203.0.113.10")
                    .body(Body::from("email=owner%40cafe.example&password=short"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/auth");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = app()
            .oneshot(Request::get("/admin/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_share_url() {
        let slug = StoreSlug::parse("sabor-brasileiro").unwrap();
        assert_eq!(
            share_url("https://order.foodia.app", &slug),
            "https://order.foodia.app/order?store=sabor-brasileiro"
        );
    }

    #[test]
    fn test_dashboard_link_is_only_active_on_dashboard() {
        let nav = NavView {
            email: "owner@cafe.example".to_string(),
            store_name: "Cafe".to_string(),
            current_path: "/admin/orders",
            flash: None,
        };
        assert!(nav.is_active("/admin/orders"));
        assert!(!nav.is_active("/admin"));
    }
}
