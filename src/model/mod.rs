//! Entity records kept in a [`KeyedStore`](crate::store::KeyedStore)

pub mod post;
pub mod user;

pub use post::{Post, PostPatch};
pub use user::{User, UserData, UserPatch};

use serde::Serialize;

use crate::error::ValidationError;

/// A record addressable by integer id
pub trait Record: Clone + Serialize {
    /// Partial update merged by [`Record::apply`]
    type Patch;

    fn id(&self) -> i64;

    fn username(&self) -> &str;

    /// Shallow-merge the fields present in `patch`. On error `self` is left
    /// untouched.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), ValidationError>;
}
