//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Catalog
//! GET  /category/{cat_id}/     - Category page with its products
//!
//! # Cart
//! GET  /cart/                  - Cart page (requires a cart)
//! POST /api/cart/              - Apply cart changes (JSON)
//!
//! # Checkout
//! GET  /checkout/              - Checkout form (requires a cart, from /cart/ or /checkout/)
//! POST /checkout/              - Submit checkout (same guards)
//! GET  /thank-you/             - Confirmation (from /checkout/)
//! ```

pub mod cart;
pub mod category;
pub mod checkout;
pub mod context;
pub mod health;
pub mod home;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::middleware::{CHECKOUT_REFERRERS, THANK_YOU_REFERRERS, require_cart, require_referrer};
use crate::state::AppState;

/// Create the page routes.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/category/{cat_id}/", get(category::show))
        // Cart page
        .route("/cart/", get(cart::show).layer(from_fn(require_cart)))
        // Checkout: cart check runs first, then the referrer check
        .route(
            "/checkout/",
            get(checkout::show)
                .post(checkout::submit)
                .layer(from_fn_with_state(CHECKOUT_REFERRERS, require_referrer))
                .layer(from_fn(require_cart)),
        )
        .route(
            "/thank-you/",
            get(checkout::thank_you)
                .layer(from_fn_with_state(THANK_YOU_REFERRERS, require_referrer)),
        )
}

/// Create the JSON cart API routes.
pub fn cart_api_routes() -> Router<AppState> {
    Router::new().route("/api/cart/", post(cart::update))
}

/// Create the health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(page_routes())
        .merge(cart_api_routes())
}
