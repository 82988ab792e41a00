//! Admin-local models.
//!
//! Domain rows come from `foodia_core::models`. This module holds the admin's
//! own account type, session state, page filters, and form validation.

pub mod account;
pub mod customers;
pub mod orders;
pub mod products;
pub mod session;
pub mod store_settings;

pub use account::Account;
pub use session::{CurrentAccount, keys as session_keys};
