//! Category page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use ebag_core::{CategoryId, CurrencyCode, Price};

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::session::load_cart;
use crate::models::{Cart, Category, Product};
use crate::routes::context::CommonContext;
use crate::state::AppState;

/// Product card data for the category page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: Option<String>,
    /// Quantity preselected in the card: the cart quantity, or 1.
    pub quantity: u32,
    pub in_cart: bool,
}

impl ProductView {
    fn new(product: &Product, cart: &Cart, currency: CurrencyCode) -> Self {
        let in_cart = cart.quantity_of(product.id);
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: Price::new(product.price, currency).to_string(),
            image: product.image.clone(),
            quantity: in_cart.unwrap_or(1),
            in_cart: in_cart.is_some(),
        }
    }
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "category.html")]
pub struct CategoryTemplate {
    pub category: Category,
    pub products: Vec<ProductView>,
    pub ctx: CommonContext,
}

/// Display a category and its products.
///
/// Non-numeric and unknown IDs are both a 404.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(cat_id): Path<String>,
) -> Result<CategoryTemplate> {
    let not_found = || AppError::NotFound(format!("category {cat_id}"));

    let id = CategoryId::from_digits(&cat_id).map_err(|_| not_found())?;
    let category = state.catalog().category(id).await?.ok_or_else(not_found)?;
    let products = state.catalog().products_in_category(id).await?;

    let cart = load_cart(&session).await?.unwrap_or_default();
    let currency = state.currency();
    let categories = state.catalog().categories().await?;

    Ok(CategoryTemplate {
        category,
        products: products
            .iter()
            .map(|product| ProductView::new(product, &cart, currency))
            .collect(),
        ctx: CommonContext::new(categories, &cart, currency),
    })
}
