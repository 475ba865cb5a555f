//! Cart route handlers.
//!
//! The cart page is rendered server-side; every change goes through the JSON
//! endpoint [`update`], called by `static/js/cart.js`.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::session::{load_cart, save_cart};
use crate::models::{Cart, CartError, CartItemInput, ids_to_lookup};
use crate::routes::context::CommonContext;
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub ctx: CommonContext,
}

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartTemplate> {
    let ctx = CommonContext::load(&state, &session).await?;
    Ok(CartTemplate { ctx })
}

/// Body of `POST /api/cart/`.
#[derive(Debug, Default, Deserialize)]
pub struct CartUpdateRequest {
    #[serde(default)]
    pub items: Vec<CartItemInput>,
}

/// Response of `POST /api/cart/`.
#[derive(Debug, Serialize)]
pub struct CartUpdateResponse {
    /// 1 on success, 0 on error.
    pub success: u8,
    /// Empty on success.
    pub err_msg: String,
    pub items_in_cart: usize,
    pub cart: Cart,
}

impl CartUpdateResponse {
    fn updated(cart: Cart) -> Self {
        Self {
            success: 1,
            err_msg: String::new(),
            items_in_cart: cart.len(),
            cart,
        }
    }

    fn failed(error: CartError, cart: Cart) -> Self {
        Self {
            success: 0,
            err_msg: error.to_string(),
            items_in_cart: 0,
            cart,
        }
    }
}

/// Apply a batch of cart changes.
///
/// Always answers 200 with a [`CartUpdateResponse`]; item errors are reported
/// in the payload and leave the session cart as it was. A body that is not
/// the expected JSON counts as invalid parameters.
#[instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<CartUpdateRequest>, JsonRejection>,
) -> Result<Json<CartUpdateResponse>> {
    let cart = load_cart(&session).await?.unwrap_or_default();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected cart update body");
            return Ok(Json(CartUpdateResponse::failed(CartError::InvalidParams, cart)));
        }
    };

    let ids = ids_to_lookup(&request.items);
    let products = if ids.is_empty() {
        HashMap::new()
    } else {
        state.catalog().products_by_ids(&ids).await?
    };

    match cart.apply(&request.items, &products) {
        Ok(updated) => {
            save_cart(&session, &updated).await?;

            let count = updated.len().to_string();
            add_breadcrumb("cart", "Cart updated", Some(&[("items_in_cart", count.as_str())]));
            tracing::debug!(items_in_cart = updated.len(), "Cart updated");

            Ok(Json(CartUpdateResponse::updated(updated)))
        }
        Err(error) => {
            tracing::info!(%error, "Cart update rejected");
            Ok(Json(CartUpdateResponse::failed(error, cart)))
        }
    }
}
