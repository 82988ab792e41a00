//! Core types for FoodIa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod color;
pub mod email;
pub mod id;
pub mod money;
pub mod slug;
pub mod status;

pub use color::{ColorError, HexColor};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{Money, MoneyError};
pub use slug::{SlugError, StoreSlug};
pub use status::*;
