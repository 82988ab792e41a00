//! Session-stored owner state.
//!
//! The signed-in account and the pending flash notice both live in the
//! `PostgreSQL`-backed session.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use foodia_core::flash::Flash;
use foodia_core::{AccountId, Email};

/// Session-stored account identity.
///
/// Minimal data stored in the session to identify the signed-in owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAccount {
    /// Account's database ID.
    pub id: AccountId,
    /// Account's email address.
    pub email: Email,
}

/// Session keys for owner data.
pub mod keys {
    /// Key for storing the signed-in account.
    pub const CURRENT_ACCOUNT: &str = "current_account";

    /// Key for the pending flash notice.
    pub const FLASH: &str = "flash";
}

/// Queue a notice for the next rendered page.
///
/// Failures are logged, not returned.
pub async fn set_flash(session: &Session, flash: Flash) {
    if let Err(e) = session.insert(keys::FLASH, flash).await {
        tracing::warn!(error = %e, "Failed to store flash message");
    }
}

/// Take the pending notice, if any.
pub async fn take_flash(session: &Session) -> Option<Flash> {
    session.remove::<Flash>(keys::FLASH).await.ok().flatten()
}
