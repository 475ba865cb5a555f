//! Integration tests for the ebag storefront.
//!
//! The tests talk HTTP to a running storefront whose catalog was loaded from
//! `crates/cli/seed/catalog.yaml`. They are `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p ebag-cli -- migrate
//! cargo run -p ebag-cli -- seed crates/cli/seed/catalog.yaml --clear
//! cargo run -p ebag-storefront &
//! cargo test -p ebag-integration-tests -- --ignored
//! ```
//!
//! `EBAG_BASE_URL` selects the server (default `http://localhost:8000`).

use reqwest::{Client, redirect};
use serde_json::{Value, json};

/// Base URL of the storefront under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("EBAG_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// A client that keeps the session cookie and does not follow redirects,
/// so tests can assert on guard redirects.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Post a cart update and return the JSON response.
///
/// # Panics
///
/// Panics if the request fails or the response is not JSON.
pub async fn update_cart(client: &Client, items: Value) -> Value {
    client
        .post(format!("{}/api/cart/", base_url()))
        .json(&json!({ "items": items }))
        .send()
        .await
        .expect("Failed to update cart")
        .json()
        .await
        .expect("Cart response is not JSON")
}
