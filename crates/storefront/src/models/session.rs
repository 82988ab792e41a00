//! Session-stored visitor state.
//!
//! Each visitor keeps one cart per store plus a pending flash notice. Both
//! live in the `PostgreSQL`-backed session so a cart survives page reloads.

use tower_sessions::Session;

use foodia_core::StoreId;
use foodia_core::cart::Cart;
use foodia_core::flash::Flash;

/// Session keys for visitor data.
pub mod keys {
    /// Key prefix for per-store carts; the store id is appended.
    pub const CART_PREFIX: &str = "cart:";

    /// Key for the pending flash notice.
    pub const FLASH: &str = "flash";
}

fn cart_key(store_id: StoreId) -> String {
    format!("{}{store_id}", keys::CART_PREFIX)
}

/// Load the visitor's cart for a store, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn load_cart(
    session: &Session,
    store_id: StoreId,
) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(&cart_key(store_id))
        .await?
        .unwrap_or_default())
}

/// Persist the visitor's cart for a store. Empty carts are removed.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn save_cart(
    session: &Session,
    store_id: StoreId,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    let key = cart_key(store_id);
    if cart.is_empty() {
        session.remove::<Cart>(&key).await?;
        Ok(())
    } else {
        session.insert(&key, cart).await
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_keys_are_per_store() {
        assert_eq!(cart_key(StoreId::new(7)), "cart:7");
        assert_ne!(cart_key(StoreId::new(7)), cart_key(StoreId::new(8)));
    }
}
