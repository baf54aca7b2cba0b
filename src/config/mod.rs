use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<String>,
  /// Log level, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// Labels naming each entity kind in store messages
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StoreLabels {
  #[serde(default = "default_user_kind")]
  pub user_kind: String,
  #[serde(default = "default_post_kind")]
  pub post_kind: String,
}

fn default_user_kind() -> String {
  "user".to_string()
}

fn default_post_kind() -> String {
  "post".to_string()
}

impl Default for StoreLabels {
  fn default() -> Self {
    Self {
      user_kind: default_user_kind(),
      post_kind: default_post_kind(),
    }
  }
}

/// Rolestore configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,

  /// Store labels
  #[serde(default)]
  pub stores: StoreLabels,
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: &str) -> anyhow::Result<Self> {
    let config_str = fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file '{}'", path))?;

    let config: Config = toml::from_str(&config_str)
      .with_context(|| format!("Failed to parse config file '{}'", path))?;

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn test_default_config() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.log.level, "info");
    assert_eq!(config.log.file, None);
    assert_eq!(config.stores.user_kind, "user");
    assert_eq!(config.stores.post_kind, "post");
  }

  #[test]
  fn test_partial_config() {
    let config_str = r#"
[log]
level = "debug"

[stores]
post_kind = "article"
"#;

    let config: Config = toml::from_str(config_str).unwrap();
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.stores.user_kind, "user");
    assert_eq!(config.stores.post_kind, "article");
  }

  #[test]
  fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[log]\nfile = \"/tmp/rolestore.log\"").unwrap();

    let config = Config::from_file(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.log.file.as_deref(), Some("/tmp/rolestore.log"));
    assert_eq!(config.log.level, "info");
  }

  #[test]
  fn test_from_file_errors_name_path() {
    let err = Config::from_file("/nonexistent/rolestore.toml").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/rolestore.toml"));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[log\nlevel = ").unwrap();
    let err = Config::from_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
  }
}
