use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::constants;

/// Endpoint and path overrides read from `config.toml`.
///
/// Every field is optional; anything left out falls back to the embedded
/// constants or the platform data directory.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
  pub api_base_url: Option<String>,
  pub ai_base_url: Option<String>,
  pub ai_model: Option<String>,
  pub data_dir: Option<PathBuf>,
  pub request_timeout_secs: Option<u64>,
}

fn project_dirs() -> Option<ProjectDirs> {
  ProjectDirs::from("", "", "youtok")
}

impl Config {
  pub fn load() -> Self {
    if let Some(proj_dirs) = project_dirs() {
      return Self::load_from(&proj_dirs.config_dir().join("config.toml"));
    }
    Self::default()
  }

  /// Read a config file, falling back to defaults when it is missing or malformed.
  pub fn load_from(path: &Path) -> Self {
    if let Ok(content) = std::fs::read_to_string(path) {
      match toml::from_str(&content) {
        Ok(config) => return config,
        Err(e) => tracing::warn!(path = %path.display(), err = %e, "config: malformed config file, using defaults"),
      }
    }
    Self::default()
  }

  pub fn api_base_url(&self) -> &str {
    self.api_base_url.as_deref().unwrap_or(&constants().api_base_url)
  }

  pub fn ai_base_url(&self) -> &str {
    self.ai_base_url.as_deref().unwrap_or(&constants().ai_base_url)
  }

  pub fn ai_model(&self) -> &str {
    self.ai_model.as_deref().unwrap_or(&constants().ai_model)
  }

  pub fn request_timeout(&self) -> Option<Duration> {
    self.request_timeout_secs.map(Duration::from_secs)
  }

  /// Directory holding persisted state and the log file.
  pub fn data_dir(&self) -> PathBuf {
    if let Some(ref dir) = self.data_dir {
      return dir.clone();
    }
    project_dirs().map_or_else(|| std::env::temp_dir().join("youtok"), |d| d.data_dir().to_path_buf())
  }
}
