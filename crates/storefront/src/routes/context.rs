//! Data shared by every page: the category menu and the cart summary.

use tower_sessions::Session;

use ebag_core::{CurrencyCode, Price};

use crate::error::Result;
use crate::models::session::load_cart;
use crate::models::{Cart, CartEntry, Category};
use crate::state::AppState;

/// One cart line as shown in the header dropdown and on the cart page.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl CartLineView {
    fn new(entry: &CartEntry, currency: CurrencyCode) -> Self {
        Self {
            product_id: entry.product_data.id.clone(),
            name: entry.product_data.name.clone(),
            image: entry.product_data.image.clone(),
            quantity: entry.quantity(),
            unit_price: Price::new(entry.unit_price(), currency).to_string(),
            line_total: Price::new(entry.line_total(), currency).to_string(),
        }
    }
}

/// Context every page template receives.
#[derive(Debug, Clone)]
pub struct CommonContext {
    /// All categories, ordered by ID.
    pub categories: Vec<Category>,
    /// Cart lines; empty when the session has no cart.
    pub cart: Vec<CartLineView>,
    /// Formatted cart total.
    pub cart_total: String,
    /// Number of distinct products in the cart.
    pub items_in_cart: usize,
}

impl CommonContext {
    /// Load the category menu and the session cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or the session store fails.
    pub async fn load(state: &AppState, session: &Session) -> Result<Self> {
        let categories = state.catalog().categories().await?;
        let cart = load_cart(session).await?.unwrap_or_default();
        Ok(Self::new(categories, &cart, state.currency()))
    }

    /// Build the context from already loaded data.
    #[must_use]
    pub fn new(categories: Vec<Category>, cart: &Cart, currency: CurrencyCode) -> Self {
        Self {
            categories,
            cart: cart
                .entries()
                .map(|entry| CartLineView::new(entry, currency))
                .collect(),
            cart_total: cart.total(currency).to_string(),
            items_in_cart: cart.len(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use ebag_core::{CategoryId, ProductId};
    use rust_decimal::Decimal;

    use crate::models::{CartItemInput, Product};

    #[test]
    fn test_context_summarizes_cart() {
        let products: HashMap<ProductId, Product> = [(1, 450), (2, 1999)]
            .into_iter()
            .map(|(id, cents)| {
                let product = Product {
                    id: ProductId::new(id),
                    category_id: CategoryId::new(1),
                    name: format!("Product {id}"),
                    description: String::new(),
                    price: Decimal::new(cents, 2),
                    image: None,
                };
                (product.id, product)
            })
            .collect();

        let cart = Cart::new()
            .apply(
                &[CartItemInput::new("1", "2"), CartItemInput::new("2", "1")],
                &products,
            )
            .unwrap();

        let ctx = CommonContext::new(Vec::new(), &cart, CurrencyCode::USD);

        assert_eq!(ctx.items_in_cart, 2);
        assert_eq!(ctx.cart_total, "$28.99");
        assert_eq!(ctx.cart[0].line_total, "$9.00");
        assert_eq!(ctx.cart[1].unit_price, "$19.99");
    }

    #[test]
    fn test_context_without_cart() {
        let ctx = CommonContext::new(Vec::new(), &Cart::new(), CurrencyCode::USD);
        assert_eq!(ctx.items_in_cart, 0);
        assert!(ctx.cart.is_empty());
        assert_eq!(ctx.cart_total, "$0.00");
    }
}
