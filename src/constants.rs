//! Endpoints, storage keys and user-facing placeholders from `constants.ron`.
//!
//! The file is embedded with `include_str!` and parsed once on first access.

use serde::Deserialize;
use std::sync::LazyLock;

/// Built-in defaults; `config.toml` can override the endpoints.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // Video index
  pub api_base_url: String,
  pub watch_url_base: String,
  pub default_region: String,

  // AI summaries
  pub ai_base_url: String,
  pub ai_model: String,
  pub summary_prompt: String,

  // Detail view placeholders
  pub transcript_unavailable: String,
  pub summary_unavailable: String,

  // Local storage keys
  pub favorites_key: String,
  pub history_key: String,
  pub search_history_key: String,
  pub settings_key: String,

  pub log_file_name: String,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  ron::from_str(include_str!("../constants.ron")).expect("embedded constants.ron must be valid RON")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
