//! FoodIa Core - Shared domain library.
//!
//! This crate provides the types and ordering rules used across all FoodIa
//! components:
//! - `storefront` - Public landing site and customer ordering page
//! - `admin` - Store owner dashboard and store builder
//! - `cli` - Command-line tools for migrations, accounts, and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Both binaries render from these types and persist them with
//! their own repositories.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, money, emails, slugs, colors, and statuses
//! - [`models`] - Rows of the store, menu, order, and customer tables
//! - [`cart`] - Customer cart with line merging, totals, and reward points
//! - [`menu`] - Projection of a store's menu into display sections
//! - [`order`] - Checkout validation producing an order draft
//! - [`plans`] - Subscription tiers and their features
//! - [`publish`] - Store publish readiness checklist
//! - [`quiz`] - Plan recommendation quiz
//! - [`flash`] - One-shot notices shown on the next rendered page

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod flash;
pub mod menu;
pub mod models;
pub mod order;
pub mod plans;
pub mod publish;
pub mod quiz;
pub mod types;

pub use types::*;
