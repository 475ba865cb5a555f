//! Route guards that redirect to the home page.
//!
//! - [`require_referrer`] - the request must come from one of a set of pages
//!   (checkout only from the cart or checkout page, thank-you only from
//!   checkout)
//! - [`require_cart`] - the session must hold a cart
//!
//! Both are plain `axum::middleware` functions, attached per route:
//!
//! ```rust,ignore
//! get(handler)
//!     .layer(from_fn_with_state(CHECKOUT_REFERRERS, require_referrer))
//!     .layer(from_fn(require_cart))
//! ```

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::REFERER},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session::has_cart;

/// Pages allowed to lead to the checkout page.
pub const CHECKOUT_REFERRERS: &[&str] = &["/cart/", "/checkout/"];

/// Pages allowed to lead to the thank-you page.
pub const THANK_YOU_REFERRERS: &[&str] = &["/checkout/"];

/// Whether the `Referer` header contains one of `allowed`.
///
/// A missing or non-UTF-8 header never matches.
#[must_use]
pub fn referrer_allowed(headers: &HeaderMap, allowed: &[&str]) -> bool {
    headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|referrer| allowed.iter().any(|page| referrer.contains(page)))
}

/// Redirect to `/` unless the request was referred by an allowed page.
pub async fn require_referrer(
    State(allowed): State<&'static [&'static str]>,
    request: Request,
    next: Next,
) -> Response {
    if !referrer_allowed(request.headers(), allowed) {
        tracing::debug!(path = %request.uri().path(), "Referrer check failed, redirecting home");
        return Redirect::to("/").into_response();
    }

    next.run(request).await
}

/// Redirect to `/` if the session has no cart.
///
/// # Errors
///
/// Returns `AppError::Session` if the session store fails.
pub async fn require_cart(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !has_cart(&session).await? {
        tracing::debug!(path = %request.uri().path(), "No cart in session, redirecting home");
        return Ok(Redirect::to("/").into_response());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_referrer(referrer: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_str(referrer).unwrap());
        headers
    }

    #[test]
    fn test_missing_referrer_is_rejected() {
        assert!(!referrer_allowed(&HeaderMap::new(), CHECKOUT_REFERRERS));
    }

    #[test]
    fn test_cart_referrer_allows_checkout() {
        let headers = headers_with_referrer("http://localhost:8000/cart/");
        assert!(referrer_allowed(&headers, CHECKOUT_REFERRERS));
    }

    #[test]
    fn test_checkout_referrer_allows_checkout_and_thank_you() {
        let headers = headers_with_referrer("https://shop.test/checkout/?step=2");
        assert!(referrer_allowed(&headers, CHECKOUT_REFERRERS));
        assert!(referrer_allowed(&headers, THANK_YOU_REFERRERS));
    }

    #[test]
    fn test_cart_referrer_does_not_allow_thank_you() {
        let headers = headers_with_referrer("http://localhost:8000/cart/");
        assert!(!referrer_allowed(&headers, THANK_YOU_REFERRERS));
    }

    #[test]
    fn test_other_pages_are_rejected() {
        let headers = headers_with_referrer("http://localhost:8000/category/1/");
        assert!(!referrer_allowed(&headers, CHECKOUT_REFERRERS));

        // Trailing slash is part of the match
        let headers = headers_with_referrer("http://localhost:8000/cart");
        assert!(!referrer_allowed(&headers, CHECKOUT_REFERRERS));
    }
}
