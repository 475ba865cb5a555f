//! Core types for ebag.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod digits;
pub mod email;
pub mod id;
pub mod price;

pub use digits::{DigitsError, parse_digits};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
