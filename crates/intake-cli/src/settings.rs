//! Runtime settings, layered from an optional TOML file and `INTAKE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// The delimited text file records are appended to and read from.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_store_path() -> PathBuf { PathBuf::from("patients.csv") }

impl Default for Settings {
  fn default() -> Self { Self { store_path: default_store_path() } }
}

impl Settings {
  /// Read `file` (if it exists) and the environment. `INTAKE_STORE_PATH`
  /// overrides the file.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("INTAKE"))
      .build()
      .with_context(|| format!("failed to read config file {file:?}"))?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise Settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
  }
}

/// Replace a leading `~` component with `$HOME`, when it is set.
pub fn expand_tilde(path: &Path) -> PathBuf {
  match (path.strip_prefix("~"), std::env::var_os("HOME")) {
    (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
    _ => path.to_path_buf(),
  }
}
