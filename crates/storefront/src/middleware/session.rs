//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The cookie is
//! signed with the configured session secret.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::{MIN_SESSION_SECRET_LENGTH, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ebag_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Error building the session layer.
#[derive(Debug, thiserror::Error)]
pub enum SessionConfigError {
    #[error("session secret must be at least {MIN_SESSION_SECRET_LENGTH} bytes")]
    SecretTooShort,
}

/// Create the session layer with `PostgreSQL` store.
///
/// The `tower_sessions.session` table must exist; `ebag-cli migrate` creates
/// it.
///
/// # Errors
///
/// Returns `SessionConfigError::SecretTooShort` if the session secret cannot
/// be turned into a signing key.
pub fn create_session_layer(
    pool: &PgPool,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<PostgresStore, SignedCookie>, SessionConfigError> {
    let store = PostgresStore::new(pool.clone());
    configure_session_layer(store, config)
}

/// Apply the storefront cookie settings to a session layer over any store.
///
/// # Errors
///
/// Returns `SessionConfigError::SecretTooShort` if the session secret cannot
/// be turned into a signing key.
pub fn configure_session_layer<S: SessionStore + Clone>(
    store: S,
    config: &StorefrontConfig,
) -> Result<SessionManagerLayer<S, SignedCookie>, SessionConfigError> {
    let key = Key::try_from(config.session_secret.expose_secret().as_bytes())
        .map_err(|_| SessionConfigError::SecretTooShort)?;

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key))
}
