//! User record
//!
//! Construction validates the id, username and email; a `User` value that
//! exists is always well-formed.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::Record;
use crate::error::ValidationError;
use crate::policy::Role;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,20}$") {
        Ok(regex) => regex,
        Err(err) => panic!("Email regex is invalid: {err}"),
    }
});

/// Check that `email` looks like `local@domain.tld`
pub fn is_email_valid(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Attributes supplied alongside id and username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub email: String,
    pub role: Role,
}

/// A validated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: i64,
    username: String,
    email: String,
    role: Role,
}

impl User {
    /// Create a user, rejecting a non-positive id, a blank username or a
    /// malformed email.
    pub fn new(
        id: i64,
        username: impl Into<String>,
        data: UserData,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        if id < 1 {
            return Err(ValidationError::InvalidId(id));
        }
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyUsername);
        }
        if !is_email_valid(&data.email) {
            return Err(ValidationError::InvalidEmail {
                username,
                email: data.email,
            });
        }

        Ok(Self {
            id,
            username,
            email: data.email.trim().to_string(),
            role: data.role,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }
}

/// Partial update for a stored user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl Record for User {
    type Patch = UserPatch;

    fn id(&self) -> i64 {
        self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn apply(&mut self, patch: UserPatch) -> Result<(), ValidationError> {
        let merged = User::new(
            self.id,
            patch.username.unwrap_or_else(|| self.username.clone()),
            UserData {
                email: patch.email.unwrap_or_else(|| self.email.clone()),
                role: patch.role.unwrap_or(self.role),
            },
        )?;
        *self = merged;
        Ok(())
    }
}
