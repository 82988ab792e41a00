//! Integration tests for owner sign-up, sign-in, and access control.
//!
//! These tests require the admin server running (`cargo run -p foodia-admin`)
//! against a migrated database.

use reqwest::{Client, StatusCode, redirect::Policy};

use foodia_integration_tests::{TEST_PASSWORD, admin_base_url, register_owner, session_client};

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_admin_pages_redirect_to_auth_when_signed_out() {
    let client = Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client");
    let base_url = admin_base_url();

    for path in [
        "/admin",
        "/admin/orders",
        "/admin/products",
        "/admin/customers",
        "/admin/ai",
        "/admin/menu-builder",
        "/admin/settings",
    ] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to request admin page");
        assert!(resp.status().is_redirection(), "{path} should redirect");
        let location = resp
            .headers()
            .get("location")
            .and_then(|value| value.to_str().ok());
        assert_eq!(location, Some("/auth"), "{path} should redirect to /auth");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_register_lands_in_store_builder() {
    let client = session_client();
    let (_, body) = register_owner(&client).await;

    assert!(body.contains("Account created!"));
    assert!(body.contains("Store Builder"));

    // Signed in: /auth bounces back into the admin
    let resp = client
        .get(format!("{}/auth", admin_base_url()))
        .send()
        .await
        .expect("Failed to load auth page");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.url().path().starts_with("/admin"));
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_register_twice_is_rejected() {
    let client = session_client();
    let (email, _) = register_owner(&client).await;

    let resp = session_client()
        .post(format!("{}/auth/register", admin_base_url()))
        .form(&[("email", email.as_str()), ("password", TEST_PASSWORD), ("plan", "")])
        .send()
        .await
        .expect("Failed to register");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Sign up failed"));
    assert!(body.contains("an account with this email already exists"));
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_login_logout_roundtrip() {
    let (email, _) = register_owner(&session_client()).await;
    let client = session_client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", email.as_str()), ("password", "wrong password"), ("plan", "")])
        .send()
        .await
        .expect("Failed to sign in");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Sign in failed"));
    assert!(body.contains("invalid email or password"));

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .form(&[("email", email.as_str()), ("password", TEST_PASSWORD), ("plan", "")])
        .send()
        .await
        .expect("Failed to sign in");
    assert_eq!(resp.url().path(), "/admin");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&email));

    let resp = client
        .post(format!("{base_url}/auth/logout"))
        .send()
        .await
        .expect("Failed to sign out");
    assert_eq!(resp.url().path(), "/auth");

    let resp = client
        .get(format!("{base_url}/admin"))
        .send()
        .await
        .expect("Failed to load dashboard");
    assert_eq!(resp.url().path(), "/auth");
}

#[tokio::test]
#[ignore = "Requires running admin server"]
async fn test_plan_from_landing_page_is_shown() {
    let resp = session_client()
        .get(format!("{}/auth?plan=growth", admin_base_url()))
        .send()
        .await
        .expect("Failed to load auth page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Growth"));
    assert!(body.contains(r#"name="plan" value="growth""#));
}
