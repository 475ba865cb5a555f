//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, referrer policy, etc.)
//! 5. Session layer (tower-sessions with `PostgreSQL` store)
//! 6. Rate limiting on the cart API (governor)
//!
//! Route-level guards ([`guards`]) are attached to individual routes.

pub mod guards;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use guards::{CHECKOUT_REFERRERS, THANK_YOU_REFERRERS, require_cart, require_referrer};
pub use rate_limit::cart_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SessionConfigError, create_session_layer};
