//! Session-resident shopping cart.
//!
//! The cart is a mapping from product ID (as a string) to a [`CartEntry`]
//! holding the requested quantity and a snapshot of the product taken when it
//! was added. Everything in the entry is a string so the session payload is
//! exactly what the browser-side cart code receives back.
//!
//! A cart with no entries is never stored: callers remove the session key
//! instead (see [`crate::models::session::save_cart`]).

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use ebag_core::{CurrencyCode, Price, ProductId, parse_digits};

use super::catalog::Product;

/// Errors that stop a cart update.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// A `product_id` or `quantity` was not a digit-only string.
    #[error("Invalid parameters.")]
    InvalidParams,

    /// A positive quantity was requested for a product that does not exist.
    #[error("The requested product does not exist.")]
    NoProduct,
}

/// Product fields captured when the product is put in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            category_id: product.category_id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone().unwrap_or_default(),
        }
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// String-encoded quantity, e.g. `"3"`.
    pub quantity: String,
    pub product_data: ProductSnapshot,
}

impl CartEntry {
    /// Quantity as a number. Malformed stored values count as zero.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        parse_digits(&self.quantity).unwrap_or(0)
    }

    /// Unit price from the snapshot. Malformed stored values count as zero.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.product_data
            .price
            .parse::<Decimal>()
            .unwrap_or(Decimal::ZERO)
    }

    /// Quantity × unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity())
    }
}

/// A single item of a cart update request, exactly as received.
///
/// Fields are kept as raw JSON so that numbers, nulls and missing keys can be
/// rejected with [`CartError::InvalidParams`] instead of a deserialization
/// failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartItemInput {
    #[serde(default)]
    pub product_id: Value,
    #[serde(default)]
    pub quantity: Value,
}

/// A validated cart update line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartItemInput {
    /// Build an input from string fields.
    #[must_use]
    pub fn new(product_id: &str, quantity: &str) -> Self {
        Self {
            product_id: Value::String(product_id.to_string()),
            quantity: Value::String(quantity.to_string()),
        }
    }

    /// Validate both fields as digit-only strings.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidParams`] if either field is not a JSON
    /// string of ASCII digits.
    pub fn parse(&self) -> Result<CartLine, CartError> {
        let (Value::String(product_id), Value::String(quantity)) =
            (&self.product_id, &self.quantity)
        else {
            return Err(CartError::InvalidParams);
        };

        let product_id =
            ProductId::from_digits(product_id).map_err(|_| CartError::InvalidParams)?;
        let quantity = parse_digits(quantity).map_err(|_| CartError::InvalidParams)?;

        Ok(CartLine {
            product_id,
            quantity,
        })
    }
}

/// Product IDs that must be looked up before applying `items`.
///
/// Only items before the first invalid one are considered, since processing
/// stops there. Items with a zero quantity are removals and need no lookup.
#[must_use]
pub fn ids_to_lookup(items: &[CartItemInput]) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = items
        .iter()
        .map_while(|item| item.parse().ok())
        .filter(|line| line.quantity > 0)
        .map(|line| line.product_id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// The shopping cart stored in the session under [`crate::models::session::keys::CART`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: BTreeMap<String, CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in product ID key order.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    /// The entry for a product, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.get(&product_id.to_string())
    }

    /// Quantity of a product in the cart, if present.
    #[must_use]
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.get(product_id).map(CartEntry::quantity)
    }

    /// Insert or replace the entry for `product`.
    pub fn put(&mut self, product: &Product, quantity: u32) {
        self.entries.insert(
            product.id.to_string(),
            CartEntry {
                quantity: quantity.to_string(),
                product_data: ProductSnapshot::from(product),
            },
        );
    }

    /// Remove a product. Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: ProductId) {
        self.entries.remove(&product_id.to_string());
    }

    /// Sum of quantity × unit price over all entries.
    #[must_use]
    pub fn total(&self, currency: CurrencyCode) -> Price {
        self.entries
            .values()
            .fold(Price::zero(currency), |total, entry| {
                total.plus(entry.line_total())
            })
    }

    /// Apply an update request and return the resulting cart.
    ///
    /// Items are processed in order: a positive quantity inserts or replaces
    /// the product's entry, a zero quantity removes it. The first invalid item
    /// or unknown product stops processing and `self` is left untouched.
    ///
    /// `products` must contain every product returned by [`ids_to_lookup`]
    /// that exists in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidParams`] or [`CartError::NoProduct`] for
    /// the first offending item.
    pub fn apply(
        &self,
        items: &[CartItemInput],
        products: &HashMap<ProductId, Product>,
    ) -> Result<Self, CartError> {
        let mut updated = self.clone();

        for item in items {
            let line = item.parse()?;
            if line.quantity > 0 {
                let product = products
                    .get(&line.product_id)
                    .ok_or(CartError::NoProduct)?;
                updated.put(product, line.quantity);
            } else {
                updated.remove(line.product_id);
            }
        }

        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ebag_core::CategoryId;

    fn product(id: i32, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            category_id: CategoryId::new(1),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            image: None,
        }
    }

    fn catalog() -> HashMap<ProductId, Product> {
        [
            product(1, Decimal::new(250, 2)),
            product(2, Decimal::new(1000, 2)),
            product(3, Decimal::new(199, 2)),
        ]
        .into_iter()
        .map(|p| (p.id, p))
        .collect()
    }

    #[test]
    fn test_apply_adds_products() {
        let cart = Cart::new()
            .apply(
                &[CartItemInput::new("1", "2"), CartItemInput::new("2", "1")],
                &catalog(),
            )
            .unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(2));
        assert_eq!(cart.quantity_of(ProductId::new(2)), Some(1));
    }

    #[test]
    fn test_apply_replaces_quantity() {
        let cart = Cart::new()
            .apply(&[CartItemInput::new("1", "2")], &catalog())
            .unwrap()
            .apply(&[CartItemInput::new("1", "5")], &catalog())
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(ProductId::new(1)), Some(5));
    }

    #[test]
    fn test_apply_zero_quantity_removes() {
        let cart = Cart::new()
            .apply(
                &[CartItemInput::new("1", "2"), CartItemInput::new("2", "1")],
                &catalog(),
            )
            .unwrap()
            .apply(&[CartItemInput::new("1", "0")], &catalog())
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert!(cart.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_apply_zero_quantity_for_absent_product_is_noop() {
        let cart = Cart::new()
            .apply(&[CartItemInput::new("99", "0")], &catalog())
            .unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_apply_removing_last_item_leaves_empty_cart() {
        let cart = Cart::new()
            .apply(
                &[CartItemInput::new("3", "1"), CartItemInput::new("3", "0")],
                &catalog(),
            )
            .unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_apply_rejects_non_digit_fields() {
        let cases = [
            CartItemInput::new("a", "1"),
            CartItemInput::new("1", "-1"),
            CartItemInput::new("1", "1.5"),
            CartItemInput::new("", "1"),
            CartItemInput::new("1", ""),
            CartItemInput {
                product_id: Value::from(1),
                quantity: Value::String("1".to_string()),
            },
            CartItemInput {
                product_id: Value::String("1".to_string()),
                quantity: Value::Null,
            },
            CartItemInput::default(),
        ];

        for item in cases {
            assert_eq!(
                Cart::new().apply(&[item.clone()], &catalog()),
                Err(CartError::InvalidParams),
                "{item:?}"
            );
        }
    }

    #[test]
    fn test_apply_unknown_product() {
        assert_eq!(
            Cart::new().apply(&[CartItemInput::new("42", "1")], &catalog()),
            Err(CartError::NoProduct)
        );
    }

    #[test]
    fn test_apply_stops_at_first_error_in_order() {
        let items = [
            CartItemInput::new("42", "1"),
            CartItemInput::new("x", "1"),
        ];
        assert_eq!(
            Cart::new().apply(&items, &catalog()),
            Err(CartError::NoProduct)
        );

        let items = [
            CartItemInput::new("x", "1"),
            CartItemInput::new("42", "1"),
        ];
        assert_eq!(
            Cart::new().apply(&items, &catalog()),
            Err(CartError::InvalidParams)
        );
    }

    #[test]
    fn test_apply_error_leaves_cart_untouched() {
        let cart = Cart::new()
            .apply(&[CartItemInput::new("1", "1")], &catalog())
            .unwrap();
        let before = cart.clone();

        let result = cart.apply(
            &[CartItemInput::new("2", "4"), CartItemInput::new("42", "1")],
            &catalog(),
        );

        assert_eq!(result, Err(CartError::NoProduct));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_leading_zeros_use_canonical_key() {
        let cart = Cart::new()
            .apply(&[CartItemInput::new("001", "03")], &catalog())
            .unwrap();
        let entry = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(entry.quantity, "3");
        assert_eq!(entry.product_data.id, "1");
    }

    #[test]
    fn test_total_is_sum_of_quantity_times_price() {
        let cart = Cart::new()
            .apply(
                &[
                    CartItemInput::new("1", "3"),
                    CartItemInput::new("2", "2"),
                    CartItemInput::new("3", "1"),
                ],
                &catalog(),
            )
            .unwrap();

        // 3 × 2.50 + 2 × 10.00 + 1 × 1.99
        let total = cart.total(CurrencyCode::USD);
        assert_eq!(total.amount, Decimal::new(2949, 2));
        assert_eq!(total.to_string(), "$29.49");
    }

    #[test]
    fn test_total_of_empty_cart_is_zero() {
        assert_eq!(Cart::new().total(CurrencyCode::USD).amount, Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_is_stringified() {
        let mut with_image = product(7, Decimal::new(1250, 2));
        with_image.image = Some("/static/img/7.jpg".to_string());

        let snapshot = ProductSnapshot::from(&with_image);
        assert_eq!(snapshot.id, "7");
        assert_eq!(snapshot.category_id, "1");
        assert_eq!(snapshot.price, "12.50");
        assert_eq!(snapshot.image, "/static/img/7.jpg");

        let snapshot = ProductSnapshot::from(&product(8, Decimal::ONE));
        assert_eq!(snapshot.image, "");
    }

    #[test]
    fn test_ids_to_lookup_stops_at_invalid_item() {
        let items = [
            CartItemInput::new("2", "1"),
            CartItemInput::new("3", "0"),
            CartItemInput::new("1", "1"),
            CartItemInput::new("2", "5"),
            CartItemInput::new("bad", "1"),
            CartItemInput::new("9", "1"),
        ];
        assert_eq!(
            ids_to_lookup(&items),
            vec![ProductId::new(1), ProductId::new(2)]
        );
    }

    #[test]
    fn test_cart_serializes_as_plain_map() {
        let cart = Cart::new()
            .apply(&[CartItemInput::new("1", "2")], &catalog())
            .unwrap();
        let json = serde_json::to_value(&cart).unwrap();

        assert_eq!(json["1"]["quantity"], "2");
        assert_eq!(json["1"]["product_data"]["price"], "2.50");
        assert_eq!(serde_json::to_value(Cart::new()).unwrap(), serde_json::json!({}));
    }
}
