//! Store owner accounts.

use chrono::{DateTime, Utc};

use foodia_core::{AccountId, Email};

/// A store owner who can sign in to the admin panel (domain type).
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Sign-in email, normalized to lowercase.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
