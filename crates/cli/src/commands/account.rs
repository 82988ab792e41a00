//! Owner account commands.
//!
//! # Usage
//!
//! ```bash
//! foodia-cli account create -e owner@example.com -p 'a long password'
//! ```
//!
//! Uses the same validation and Argon2id hashing as the sign-up form, so an
//! account created here can sign in at `/auth` straight away.

use thiserror::Error;

use foodia_admin::services::{AuthError, AuthService};

use super::{ConnectError, connect};

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a new owner account.
///
/// # Errors
///
/// Returns `AccountError::Auth` if the email is invalid or taken, or the
/// password is too short.
pub async fn create(email: &str, password: &str) -> Result<(), AccountError> {
    let pool = connect().await?;

    tracing::info!("Creating account: {}", email);
    let account = AuthService::new(&pool).register(email, password).await?;

    tracing::info!(account_id = %account.id, "Account created: {}", account.email);
    Ok(())
}
