//! Error types
//!
//! Two tiers: [`ValidationError`] rejects malformed user data at
//! construction, [`Error`] reports the soft outcomes of store and agent
//! operations (not found, empty, denied).

use thiserror::Error;

use crate::policy::Permission;

/// Result type for store and agent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Malformed user data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Id must be strictly positive
    #[error("ID must be a positive number, got {0}!")]
    InvalidId(i64),

    /// Username empty or whitespace only
    #[error("Username must not be empty!")]
    EmptyUsername,

    /// Email does not look like `local@domain.tld`
    #[error("Hi {username}, your email is not valid!")]
    InvalidEmail { username: String, email: String },
}

/// Soft failures of store and agent operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No record with the requested id
    #[error("Can't find such {kind}!")]
    NotFound { kind: String },

    /// The store holds no records at all
    #[error("There is no {kind} created!")]
    Empty { kind: String },

    /// The acting user may not perform the requested action
    #[error("{username} is not allowed to perform: {permission}!")]
    Denied {
        username: String,
        permission: Permission,
    },

    /// A merged record failed validation; nothing was written
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl Error {
    pub fn not_found(kind: impl Into<String>) -> Self {
        Error::NotFound { kind: kind.into() }
    }

    pub fn empty(kind: impl Into<String>) -> Self {
        Error::Empty { kind: kind.into() }
    }

    pub fn denied(username: impl Into<String>, permission: Permission) -> Self {
        Error::Denied {
            username: username.into(),
            permission,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Error::Denied { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Error::Empty { .. })
    }
}
