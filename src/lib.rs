//! rolestore - in-memory keyed stores with role-gated post operations

pub mod agent;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod policy;
pub mod store;
pub mod util;

pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use model::{Post, PostPatch, Record, User, UserData, UserPatch};
pub use policy::{Grant, Permission, Role, allowed_permissions, perform_action};
pub use store::{KeyedStore, Status};
