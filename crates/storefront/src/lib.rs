//! ebag storefront library.
//!
//! Category browsing, a session cart updated through a JSON endpoint, and a
//! checkout flow gated by referrer checks. The binary in `main.rs` wires
//! these modules to `PostgreSQL`, Sentry and the HTTP listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
