//! Small helpers shared across modules

pub mod time;

pub use time::{next_id, now_ms};
