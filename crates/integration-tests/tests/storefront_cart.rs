//! Integration tests for browsing and the JSON cart endpoint.
//!
//! These tests require:
//! - A migrated and seeded database (see the crate docs)
//! - The storefront running at `EBAG_BASE_URL`

use reqwest::StatusCode;
use serde_json::json;

use ebag_integration_tests::{base_url, browser, update_cart};

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_health() {
    let client = browser();

    let resp = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .expect("Failed to reach /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_category_page() {
    let client = browser();

    let resp = client
        .get(format!("{}/category/1/", base_url()))
        .send()
        .await
        .expect("Failed to get category");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Fruit"));

    let resp = client
        .get(format!("{}/category/999999/", base_url()))
        .send()
        .await
        .expect("Failed to get category");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_cart_lifecycle() {
    let client = browser();

    let resp = update_cart(&client, json!([{ "product_id": "1", "quantity": "3" }])).await;
    assert_eq!(resp["success"], 1);
    assert_eq!(resp["items_in_cart"], 1);
    assert_eq!(resp["cart"]["1"]["quantity"], "3");

    let resp = client
        .get(format!("{}/cart/", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = update_cart(&client, json!([{ "product_id": "1", "quantity": "0" }])).await;
    assert_eq!(resp["success"], 1);
    assert_eq!(resp["items_in_cart"], 0);
    assert_eq!(resp["cart"], json!({}));

    let resp = client
        .get(format!("{}/cart/", base_url()))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
#[ignore = "Requires running storefront"]
async fn test_cart_errors() {
    let client = browser();

    let resp = update_cart(&client, json!([{ "product_id": "x", "quantity": "1" }])).await;
    assert_eq!(resp["success"], 0);
    assert_eq!(resp["err_msg"], "Invalid parameters.");

    let resp = update_cart(
        &client,
        json!([{ "product_id": "999999", "quantity": "1" }]),
    )
    .await;
    assert_eq!(resp["success"], 0);
    assert_eq!(resp["err_msg"], "The requested product does not exist.");
}
