//! Session-related types.
//!
//! The only state kept in the session is the shopping cart.

use tower_sessions::Session;

use super::cart::Cart;

/// Session keys.
pub mod keys {
    /// Key for the shopping cart (product ID -> entry mapping).
    pub const CART: &str = "cart";
}

/// Load the cart from the session.
///
/// Returns `None` when the session has no cart key.
///
/// # Errors
///
/// Returns an error if the session store fails or the stored value does not
/// deserialize as a [`Cart`].
pub async fn load_cart(session: &Session) -> Result<Option<Cart>, tower_sessions::session::Error> {
    session.get::<Cart>(keys::CART).await
}

/// Whether the session holds a cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn has_cart(session: &Session) -> Result<bool, tower_sessions::session::Error> {
    Ok(session
        .get_value(keys::CART)
        .await?
        .is_some())
}

/// Store the cart in the session, or remove the key if the cart is empty.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    if cart.is_empty() {
        clear_cart(session).await
    } else {
        session.insert(keys::CART, cart).await
    }
}

/// Remove the cart from the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn clear_cart(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove_value(keys::CART).await?;
    Ok(())
}
