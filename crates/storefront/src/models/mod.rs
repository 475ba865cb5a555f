//! Domain models for storefront.
//!
//! - [`catalog`] - Categories and products loaded from `PostgreSQL`
//! - [`cart`] - The session-resident shopping cart and its update rules
//! - [`checkout`] - The checkout form and its validation
//! - [`session`] - Session keys and typed session accessors

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;

pub use cart::{Cart, CartEntry, CartError, CartItemInput, ProductSnapshot, ids_to_lookup};
pub use catalog::{Category, Product};
pub use checkout::{CheckoutDetails, CheckoutErrors, CheckoutFieldError, CheckoutForm};
