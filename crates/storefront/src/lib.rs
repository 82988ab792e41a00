//! FoodIa storefront library.
//!
//! Serves the public landing site, the plan quiz, and each published store's
//! ordering page. Exposed as a library; `main.rs` only adds process setup.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
