//! Role-based access policy
//!
//! Roles map to a fixed set of permissions. [`perform_action`] is the
//! stand-alone capability check; post mutations go through
//! [`authorize_owned`], which adds the ownership gate on top of the role.

use derive_more::Display;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::logging::logged_action;
use crate::model::{Post, User};

/// User role
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[display("ADMIN")]
    Admin,
    #[display("USER")]
    User,
}

/// Action on a post
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    #[display("CREATE")]
    Create,
    #[display("READ")]
    Read,
    #[display("UPDATE")]
    Update,
    #[display("DELETE")]
    Delete,
}

const ADMIN_PERMISSIONS: &[Permission] = &[
    Permission::Create,
    Permission::Read,
    Permission::Update,
    Permission::Delete,
];

const USER_PERMISSIONS: &[Permission] = &[Permission::Read];

/// Permissions a role carries
pub fn allowed_permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => ADMIN_PERMISSIONS,
        Role::User => USER_PERMISSIONS,
    }
}

impl Role {
    /// Whether the role carries `permission`
    pub fn allows(self, permission: Permission) -> bool {
        allowed_permissions(self).contains(&permission)
    }
}

/// Successful capability check
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display("{username} is allowed to perform: {permission}")]
pub struct Grant {
    pub username: String,
    pub permission: Permission,
}

impl Serialize for Grant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Check whether a user of `role` may perform `permission`.
///
/// Gates on the role alone: an admin is granted whatever is asked for and a
/// plain user is always refused, even for `READ`.
pub fn perform_action(username: &str, role: Role, permission: Permission) -> Result<Grant> {
    logged_action("perform_action", || match role {
        Role::Admin => Ok(Grant {
            username: username.to_string(),
            permission,
        }),
        Role::User => Err(Error::denied(username, permission)),
    })
}

/// Ownership gate for mutating an existing post: the actor must hold
/// `permission` and must be the post's author.
pub fn authorize_owned(actor: &User, permission: Permission, post: &Post) -> Result<()> {
    if actor.role().allows(permission) && post.author_id == actor.id() {
        Ok(())
    } else {
        Err(Error::denied(actor.username(), permission))
    }
}
