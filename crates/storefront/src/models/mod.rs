//! Storefront-local models.
//!
//! Domain rows come from `foodia_core::models`; this module only holds what
//! the storefront keeps per visitor.

pub mod session;

pub use session::keys as session_keys;
