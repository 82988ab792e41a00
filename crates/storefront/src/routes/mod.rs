//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Landing page with plans and testimonials
//! GET  /quiz                - Plan recommendation questionnaire
//! POST /quiz                - Score answers, show recommended plan
//!
//! # Ordering
//! GET  /order?store=<slug>  - Published store menu, cart, and checkout form
//! POST /order/cart/add      - Add an item (with options) to the session cart
//! POST /order/cart/update   - Change a line's quantity
//! POST /order/cart/remove   - Remove a line
//! POST /order/checkout      - Place the order (rate limited)
//!
//! *                         - 404 page
//! ```

pub mod home;
pub mod order;
pub mod quiz;

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::error::AppError;
use crate::middleware::checkout_rate_limiter;
use crate::state::AppState;

/// Create the ordering routes router.
pub fn order_routes() -> Router<AppState> {
    let mut checkout = Router::new().route("/checkout", post(order::checkout));
    match checkout_rate_limiter() {
        Some(limiter) => checkout = checkout.layer(limiter),
        None => tracing::warn!("Checkout rate limiter could not be built; running without it"),
    }

    Router::new()
        .route("/", get(order::show))
        .route("/cart/add", post(order::add))
        .route("/cart/update", post(order::update))
        .route("/cart/remove", post(order::remove))
        .merge(checkout)
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/quiz", get(quiz::show).post(quiz::submit))
        .nest("/order", order_routes())
        .fallback(not_found)
}

/// Catch-all for unknown paths.
async fn not_found() -> Response {
    AppError::NotFound("The page you are looking for does not exist.".to_string()).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::StorefrontConfig;

    fn app() -> Router {
        let config = StorefrontConfig {
            database_url: SecretString::from("postgres://localhost/foodia_test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            admin_base_url: "http://localhost:3001".to_string(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };
        // Never connects: these routes do not touch the database.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/foodia_test")
            .unwrap();
        routes().with_state(AppState::new(config, pool))
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_home_lists_plans() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Starter"));
        assert!(html.contains("$100.00"));
        assert!(html.contains("http://localhost:3001/auth?plan=pro"));
    }

    #[tokio::test]
    async fn test_quiz_recommends_pro_for_highest_answers() {
        let body = "business-size=large&order-volume=high&team-size=large-team&preferred-channel=digital";
        let response = app()
            .oneshot(
                Request::post("/quiz")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Get started with Pro"));
        assert!(html.contains("/auth?plan=pro"));
    }

    #[tokio::test]
    async fn test_incomplete_quiz_is_shown_again() {
        let response = app()
            .oneshot(
                Request::post("/quiz")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("business-size=small"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("toast-error"));
        assert!(html.contains("value=\"small\" checked"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let response = app()
            .oneshot(Request::get("/no/such/page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
