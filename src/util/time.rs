//! Time utility functions

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Get the current timestamp in milliseconds
pub fn now_ms() -> i64 {
  SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|d| d.as_millis() as i64)
    .unwrap_or(0)
}

/// Allocate a record id from the millisecond clock, strictly increasing
/// within the process even when called twice in the same millisecond.
pub fn next_id() -> i64 {
  let now = now_ms();
  let mut last = LAST_ID.load(Ordering::Relaxed);
  loop {
    let candidate = now.max(last + 1);
    match LAST_ID.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed) {
      Ok(_) => return candidate,
      Err(actual) => last = actual,
    }
  }
}
