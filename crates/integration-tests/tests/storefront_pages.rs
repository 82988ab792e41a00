//! Integration tests for the public storefront pages.
//!
//! These tests require the storefront server running
//! (`cargo run -p foodia-storefront`) against a migrated database.

use reqwest::StatusCode;

use foodia_integration_tests::{session_client, storefront_base_url};

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health_endpoints() {
    let client = session_client();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to call health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("Failed to read response"), "ok");

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to call readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_landing_page_lists_plans() {
    let resp = session_client()
        .get(storefront_base_url())
        .send()
        .await
        .expect("Failed to load landing page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    for plan in ["Starter", "Growth", "Pro"] {
        assert!(body.contains(plan), "landing page should mention {plan}");
    }
    assert!(body.contains("/auth?plan=growth"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_quiz_recommends_plan() {
    let resp = session_client()
        .post(format!("{}/quiz", storefront_base_url()))
        .form(&[
            ("business-size", "medium"),
            ("order-volume", "medium"),
            ("team-size", "small-team"),
            ("preferred-channel", "whatsapp"),
        ])
        .send()
        .await
        .expect("Failed to submit quiz");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("We recommend the Growth plan"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_quiz_with_missing_answer_shows_error() {
    let resp = session_client()
        .post(format!("{}/quiz", storefront_base_url()))
        .form(&[("business-size", "large")])
        .send()
        .await
        .expect("Failed to submit quiz");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains("We recommend"));
    assert!(body.contains("How many orders"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_store_is_not_found() {
    let client = session_client();
    let base_url = storefront_base_url();

    for query in ["?store=no-such-store-here", "?store=Not%20A%20Slug", ""] {
        let resp = client
            .get(format!("{base_url}/order{query}"))
            .send()
            .await
            .expect("Failed to load order page");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "query {query:?}");
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_path_renders_not_found_page() {
    let resp = session_client()
        .get(format!("{}/definitely/not/here", storefront_base_url()))
        .send()
        .await
        .expect("Failed to request unknown path");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("href=\"/\""), "404 page links home");
}
