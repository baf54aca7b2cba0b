//! Logging setup and the operation log wrapper

use std::fmt;
use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;
use crate::error::Result;

/// Install the global fmt subscriber. `RUST_LOG` wins over the configured
/// level.
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}

/// Run `operation` on the store of `kind` and log
/// `"<operation> returned: <result>"` with the value it produced, then hand
/// that same value back.
pub fn logged<T, F>(kind: &str, operation: &str, f: F) -> Result<T>
where
    T: Serialize,
    F: FnOnce() -> Result<T>,
{
    emit(Some(kind), operation, f())
}

/// [`logged`] for operations not tied to a store
pub fn logged_action<T, F>(operation: &str, f: F) -> Result<T>
where
    T: Serialize,
    F: FnOnce() -> Result<T>,
{
    emit(None, operation, f())
}

fn emit<T: Serialize>(kind: Option<&str>, operation: &str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => info!(kind = kind, "{} returned: {}", operation, Returned(&result)),
        Err(_) => warn!(kind = kind, "{} returned: {}", operation, Returned(&result)),
    }
    result
}

/// Renders an operation result for the log line: values as JSON (bare
/// strings unquoted), errors by their notice text.
pub struct Returned<'a, T>(pub &'a Result<T>);

impl<T: Serialize> fmt::Display for Returned<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(value) => match serde_json::to_string(value) {
                Ok(json) if json.starts_with('"') => {
                    match serde_json::from_str::<String>(&json) {
                        Ok(s) => f.write_str(&s),
                        Err(_) => f.write_str(&json),
                    }
                }
                Ok(json) => f.write_str(&json),
                Err(e) => write!(f, "<unserializable: {}>", e),
            },
            Err(e) => write!(f, "{}", e),
        }
    }
}
