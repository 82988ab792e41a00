//! Integration tests for FoodIa.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate, then start both servers
//! cargo run -p foodia-cli -- migrate
//! cargo run -p foodia-storefront &
//! cargo run -p foodia-admin &
//!
//! # Run the ignored HTTP tests against them
//! cargo test -p foodia-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_pages` - Landing page, quiz, and 404 handling
//! - `admin_auth` - Sign-up, sign-in, and access control
//! - `ordering_flow` - Owner builds and publishes a store, a customer orders
//! - `order_contract` - Storefront-written order lines read back by the admin
//!   (runs without servers)

use reqwest::Client;

/// Base URL of the running storefront.
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL of the running admin.
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client that keeps session cookies between requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
#[allow(clippy::expect_used)]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Email address no other test run will use.
#[must_use]
pub fn unique_email() -> String {
    format!("owner-{}@example.com", uuid::Uuid::new_v4().simple())
}

/// Store link no other test run will use.
#[must_use]
pub fn unique_slug() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("test-{}", id.get(..12).unwrap_or(&id))
}

/// Password long enough for sign-up.
pub const TEST_PASSWORD: &str = "correct horse battery";

/// Register a new owner account; `client` ends up signed in.
///
/// Returns the email used and the page the sign-up redirected to.
///
/// # Panics
///
/// Panics if the request fails.
#[allow(clippy::expect_used)]
pub async fn register_owner(client: &Client) -> (String, String) {
    let email = unique_email();
    let resp = client
        .post(format!("{}/auth/register", admin_base_url()))
        .form(&[
            ("email", email.as_str()),
            ("password", TEST_PASSWORD),
            ("plan", ""),
        ])
        .send()
        .await
        .expect("Failed to register");
    let body = resp.text().await.expect("Failed to read response");
    (email, body)
}

/// Value of the first `value="..."` attribute following `marker` in `html`.
#[must_use]
pub fn value_after(html: &str, marker: &str) -> Option<String> {
    let rest = html.get(html.find(marker)? + marker.len()..)?;
    let start = rest.find("value=\"")? + "value=\"".len();
    let rest = rest.get(start..)?;
    let end = rest.find('"')?;
    rest.get(..end).map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_after_reads_following_attribute() {
        let html = r#"<input type="hidden" name="store" value="sabor">
<input type="hidden" name="item_id" value="42">"#;
        assert_eq!(value_after(html, r#"name="item_id""#).as_deref(), Some("42"));
        assert_eq!(value_after(html, r#"name="store""#).as_deref(), Some("sabor"));
        assert_eq!(value_after(html, r#"name="missing""#), None);
    }

    #[test]
    fn unique_values_differ() {
        assert_ne!(unique_email(), unique_email());
        let slug = unique_slug();
        assert!(slug.starts_with("test-"));
        assert!(foodia_core::StoreSlug::parse(&slug).is_ok());
    }
}
