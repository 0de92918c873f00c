//! Authentication service: registration and login.
//!
//! Login failures collapse to one message whether the username is unknown
//! or the password is wrong, so callers cannot probe for account existence.

pub mod credential;

use crate::error::{Error, Result};
use crate::tasks::models::User;
use crate::tasks::store::IdentityStore;

/// Authentication service over an [`IdentityStore`].
#[derive(Debug, Clone)]
pub struct AuthService<S> {
    store: S,
}

impl<S: IdentityStore> AuthService<S> {
    /// Create a service over the given store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new user. The username is trimmed before the uniqueness
    /// check and storage; the password is hashed with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the username or password is empty or
    /// whitespace-only, or `DuplicateUser` if the name is already taken
    /// (case-sensitive exact match).
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::Validation("Username cannot be empty".to_string()));
        }
        if password.trim().is_empty() {
            return Err(Error::Validation("Password cannot be empty".to_string()));
        }

        if self.store.find_user_by_name(username)?.is_some() {
            return Err(Error::DuplicateUser(username.to_string()));
        }

        self.store.create_user(username, &credential::hash_password(password))
    }

    /// Authenticate a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `Authentication` with one fixed message whether the user is
    /// unknown or the password does not verify.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = self.store.find_user_by_name(username.trim())?.ok_or(Error::Authentication)?;

        if !credential::verify_password(password, &user.credential_hash) {
            return Err(Error::Authentication);
        }

        Ok(user)
    }
}
