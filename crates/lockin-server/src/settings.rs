//! Layered server configuration: built-in defaults, then an optional TOML
//! file, then `LOCKIN_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use lockin_coach::CoachConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub coach:      CoachConfig,
}

impl ServerConfig {
  /// Load from `file` (if it exists) and the environment.
  ///
  /// Nested keys use `__` in environment variables, e.g.
  /// `LOCKIN_COACH__MODEL=llama3.2`.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000)?
      .set_default("store_path", "lockin.db")?
      .add_source(config::File::from(file).required(false))
      .add_source(
        config::Environment::with_prefix("LOCKIN")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    let mut cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
