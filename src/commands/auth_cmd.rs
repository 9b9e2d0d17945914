//! Session Commands
//!
//! Login, logout and session status. All outcomes become user-facing text;
//! errors never propagate past the caller that prints them.

use crate::client::AuthStore;
use crate::domain::{DomainError, DomainResult};

/// Authenticate against the backend and store the session cookie
pub async fn login(auth: &impl AuthStore, username: &str, password: &str) -> DomainResult<String> {
    if username.is_empty() || password.is_empty() {
        return Err(DomainError::Validation(
            "username and password must not be empty".to_string(),
        ));
    }
    auth.login(username, password).await?;
    Ok("Login successful.".to_string())
}

/// End the session and drop the stored cookie
pub async fn logout(auth: &impl AuthStore) -> DomainResult<String> {
    auth.logout().await?;
    Ok("Logout successful.".to_string())
}

/// Report whether the stored session is still accepted by the backend
pub async fn status(auth: &impl AuthStore) -> DomainResult<String> {
    if auth.session_valid().await {
        Ok("Logged in; the stored session is valid.".to_string())
    } else {
        Ok("Not logged in.".to_string())
    }
}
