use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::password::{hash_password, verify_password};
use super::AuthError;
use crate::types::Role;

/// Demo account as held in the user table
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub hashed_password: String,
    pub disabled: bool,
    pub role: Role,
}

/// Public projection of a [`User`]; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: Option<bool>,
    pub role: Role,
}

impl User {
    /// Build an enabled user, hashing `password`
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: &str,
        role: Role,
    ) -> Result<Self, AuthError> {
        let hashed_password =
            hash_password(password).map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        Ok(Self {
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
            hashed_password,
            disabled: false,
            role,
        })
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn view(&self) -> UserView {
        UserView {
            username: self.username.clone(),
            email: Some(self.email.clone()),
            full_name: Some(self.full_name.clone()),
            disabled: Some(self.disabled),
            role: self.role,
        }
    }
}

/// Read-only user table, built once at startup and shared across requests
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: HashMap<String, User>,
}

impl UserStore {
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.username.clone(), user))
                .collect(),
        }
    }

    /// The three demo accounts, one per role.
    ///
    /// | username | password      | role  |
    /// |----------|---------------|-------|
    /// | johndoe  | `secret`      | admin |
    /// | user1    | `usersecret`  | user  |
    /// | guest    | `guestsecret` | guest |
    pub fn demo() -> Result<Self, AuthError> {
        Ok(Self::from_users([
            User::new("johndoe", "John Doe", "johndoe@example.com", "secret", Role::Admin)?,
            User::new("user1", "just user", "user1@example.com", "usersecret", Role::User)?,
            User::new("guest", "just guest", "guest@example.com", "guestsecret", Role::Guest)?,
        ]))
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Look up the user and compare password hashes.
    /// Unknown users and wrong passwords fail identically.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&User, AuthError> {
        let Some(user) = self.get(username) else {
            tracing::warn!(username, "login attempt for unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        let matches = verify_password(password, &user.hashed_password)
            .map_err(|e| AuthError::PasswordHash(e.to_string()))?;
        if !matches {
            tracing::warn!(username, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(user)
    }
}
