//! FoodIa admin library.
//!
//! The store owner's side of FoodIa: sign-in, the dashboard, orders,
//! products, customers, AI campaigns, the store builder, and settings.
//! Exposed as a library so the CLI can reuse the repositories and the
//! sign-up service.
//!
//! # Access
//!
//! Every `/admin` page is scoped to the signed-in account's own store.
//! Repositories take the store id on every call and never read across
//! stores.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
