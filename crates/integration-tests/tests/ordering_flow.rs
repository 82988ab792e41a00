//! End-to-end ordering: an owner builds and publishes a store, a customer
//! orders from it, and the order shows up in the admin.
//!
//! These tests require both servers running against the same migrated
//! database:
//! - `cargo run -p foodia-storefront`
//! - `cargo run -p foodia-admin`

use reqwest::{Client, StatusCode};

use foodia_integration_tests::{
    admin_base_url, register_owner, session_client, storefront_base_url, unique_slug, value_after,
};

/// Sign up, configure the store, add one product, and publish.
///
/// Returns the signed-in admin client and the store link.
async fn published_store() -> (Client, String) {
    let admin = session_client();
    let base_url = admin_base_url();
    register_owner(&admin).await;
    let slug = unique_slug();

    let resp = admin
        .post(format!("{base_url}/admin/menu-builder/store"))
        .form(&[
            ("name", "Test Kitchen"),
            ("description", "Integration test store"),
            ("primary_color", "#16a34a"),
            ("button_color", "#facc15"),
            ("language", "en"),
            ("store_url", slug.as_str()),
        ])
        .send()
        .await
        .expect("Failed to save store");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Store saved!"));

    admin
        .post(format!("{base_url}/admin/menu-builder/categories"))
        .send()
        .await
        .expect("Failed to create category");

    let products = admin
        .get(format!("{base_url}/admin/products"))
        .send()
        .await
        .expect("Failed to load products")
        .text()
        .await
        .expect("Failed to read response");
    let category_id =
        value_after(&products, r#"name="category_id""#).expect("category option on products page");

    let resp = admin
        .post(format!("{base_url}/admin/products"))
        .form(&[
            ("name", "Coxinha"),
            ("description", "Chicken croquette"),
            ("price", "6.50"),
            ("category_id", category_id.as_str()),
        ])
        .send()
        .await
        .expect("Failed to add product");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Product added successfully"));

    let resp = admin
        .post(format!("{base_url}/admin/menu-builder/publish"))
        .send()
        .await
        .expect("Failed to publish");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Store published!"));

    (admin, slug)
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers"]
async fn test_customer_orders_from_published_store() {
    let (admin, slug) = published_store().await;
    let customer = session_client();
    let store_url = storefront_base_url();

    let page = customer
        .get(format!("{store_url}/order?store={slug}"))
        .send()
        .await
        .expect("Failed to load store");
    assert_eq!(page.status(), StatusCode::OK);
    let page = page.text().await.expect("Failed to read response");
    assert!(page.contains("Test Kitchen"));
    assert!(page.contains("Coxinha"));
    assert!(page.contains("$6.50"));

    let item_id = value_after(&page, r#"name="item_id""#).expect("add-to-cart form");
    for _ in 0..2 {
        let resp = customer
            .post(format!("{store_url}/order/cart/add"))
            .form(&[("store", slug.as_str()), ("item_id", item_id.as_str())])
            .send()
            .await
            .expect("Failed to add to cart");
        let body = resp.text().await.expect("Failed to read response");
        assert!(body.contains("Added to cart"));
    }

    let resp = customer
        .post(format!("{store_url}/order/checkout"))
        .form(&[
            ("store", slug.as_str()),
            ("customer_name", "Maria Silva"),
            ("phone", "+55 11 90000-0000"),
        ])
        .send()
        .await
        .expect("Failed to check out");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Order placed!"));
    assert!(body.contains("ORD-"));

    let orders = admin
        .get(format!("{}/admin/orders", admin_base_url()))
        .send()
        .await
        .expect("Failed to load orders")
        .text()
        .await
        .expect("Failed to read response");
    assert!(orders.contains("Maria Silva"));
    assert!(orders.contains("2× Coxinha"));
    assert!(orders.contains("$13.00"));

    let customers = admin
        .get(format!("{}/admin/customers", admin_base_url()))
        .send()
        .await
        .expect("Failed to load customers")
        .text()
        .await
        .expect("Failed to read response");
    assert!(customers.contains("Maria Silva"));
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers"]
async fn test_checkout_requires_name_and_phone() {
    let (_, slug) = published_store().await;
    let customer = session_client();
    let store_url = storefront_base_url();

    let page = customer
        .get(format!("{store_url}/order?store={slug}"))
        .send()
        .await
        .expect("Failed to load store")
        .text()
        .await
        .expect("Failed to read response");
    let item_id = value_after(&page, r#"name="item_id""#).expect("add-to-cart form");
    customer
        .post(format!("{store_url}/order/cart/add"))
        .form(&[("store", slug.as_str()), ("item_id", item_id.as_str())])
        .send()
        .await
        .expect("Failed to add to cart");

    let resp = customer
        .post(format!("{store_url}/order/checkout"))
        .form(&[("store", slug.as_str()), ("customer_name", "Maria"), ("phone", "  ")])
        .send()
        .await
        .expect("Failed to check out");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Missing information"));
    assert!(!body.contains("Order placed!"));
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers"]
async fn test_unpublished_store_is_hidden() {
    let (admin, slug) = published_store().await;

    let resp = admin
        .post(format!("{}/admin/menu-builder/unpublish", admin_base_url()))
        .send()
        .await
        .expect("Failed to unpublish");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = session_client()
        .get(format!("{}/order?store={slug}", storefront_base_url()))
        .send()
        .await
        .expect("Failed to load store");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
