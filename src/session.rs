//! Session
//!
//! The signed-in user and their bearer token, kept in storage next to the cart.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    products::Attributes,
    storage::{Storage, StorageError, TOKEN_KEY, USER_KEY},
};

/// Errors saving or clearing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The user could not be serialized.
    #[error("failed to serialize session user")]
    Serialize(#[source] serde_json::Error),

    /// The token is blank.
    #[error("session token cannot be empty")]
    EmptyToken,

    /// Wrapped storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The signed-in user, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Backend user id
    pub id: u64,

    /// Display name
    #[serde(default, rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Everything else the backend sent (email, role...)
    #[serde(flatten)]
    pub extra: Attributes,
}

impl SessionUser {
    /// Create a user with only an id.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: None,
            extra: Attributes::new(),
        }
    }
}

/// Authenticated session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: SessionUser,
    token: String,
}

impl Session {
    /// Restore the session kept in `storage`.
    ///
    /// Returns `None` when nobody is signed in or the stored user cannot be read.
    pub fn restore(storage: &impl Storage) -> Option<Self> {
        let user = match storage.get(USER_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<SessionUser>(&raw)
                .inspect_err(|error| warn!(%error, "discarding unreadable session user"))
                .ok()?,
            Ok(None) => {
                debug!("no session stored");
                return None;
            }
            Err(error) => {
                warn!(%error, "failed to read session user");
                return None;
            }
        };

        let token = match storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.trim().is_empty() => token,
            Ok(_) => {
                warn!(user = user.id, "session user stored without a token");
                return None;
            }
            Err(error) => {
                warn!(%error, "failed to read session token");
                return None;
            }
        };

        Some(Self { user, token })
    }

    /// Sign `user` in and persist the session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the token is blank or the session cannot be stored.
    pub fn login(
        storage: &impl Storage,
        user: SessionUser,
        token: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let token = token.into();

        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let raw = serde_json::to_string(&user).map_err(SessionError::Serialize)?;

        storage.put(USER_KEY, &raw)?;
        storage.put(TOKEN_KEY, &token)?;

        debug!(user = user.id, "session stored");

        Ok(Self { user, token })
    }

    /// Sign out, removing any stored session.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the stored session cannot be removed.
    pub fn logout(storage: &impl Storage) -> Result<(), SessionError> {
        storage.delete(USER_KEY)?;
        storage.delete(TOKEN_KEY)?;

        debug!("session removed");

        Ok(())
    }

    /// The signed-in user.
    #[must_use]
    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    /// Bearer token for authenticated requests.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::storage::MemoryStorage;

    use super::*;

    #[test]
    fn restore_without_session_is_none() {
        let storage = MemoryStorage::new();

        assert_eq!(Session::restore(&storage), None);
    }

    #[test]
    fn login_then_restore() -> TestResult {
        let storage = MemoryStorage::new();

        let mut user = SessionUser::new(7);
        user.name = Some("Ana".to_string());
        user.extra.insert("correo".to_string(), json!("ana@example.com"));

        let session = Session::login(&storage, user, "ey.token")?;
        let restored = Session::restore(&storage);

        assert_eq!(restored.as_ref(), Some(&session));
        assert_eq!(restored.as_ref().map(Session::token), Some("ey.token"));
        assert_eq!(
            restored.as_ref().and_then(|s| s.user().extra.get("correo")),
            Some(&json!("ana@example.com"))
        );

        Ok(())
    }

    #[test]
    fn login_rejects_blank_token() {
        let storage = MemoryStorage::new();

        let result = Session::login(&storage, SessionUser::new(1), "  ");

        assert!(matches!(result, Err(SessionError::EmptyToken)));
        assert_eq!(Session::restore(&storage), None);
    }

    #[test]
    fn logout_clears_session() -> TestResult {
        let storage = MemoryStorage::new();

        Session::login(&storage, SessionUser::new(1), "abc")?;
        Session::logout(&storage)?;

        assert_eq!(Session::restore(&storage), None);

        Ok(())
    }

    #[test]
    fn corrupt_user_is_ignored() {
        let storage = MemoryStorage::with_entries([(USER_KEY, "{oops"), (TOKEN_KEY, "abc")]);

        assert_eq!(Session::restore(&storage), None);
    }

    #[test]
    fn user_without_token_is_ignored() {
        let storage = MemoryStorage::with_entries([(USER_KEY, r#"{"id":3,"nombre":"Leo"}"#)]);

        assert_eq!(Session::restore(&storage), None);
    }
}
