use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::constants::constants;
use crate::storage::{Storage, discard, persist_json};

/// Which feed the home view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
  #[default]
  Trending,
  Topics,
}

/// Which summary the detail view opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLength {
  #[default]
  Short,
  Long,
}

/// User preferences, persisted as one camelCase JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
  pub default_summary_length: SummaryLength,
  pub save_history: bool,
  /// Two-letter region code for the trending feed.
  #[serde(rename = "trendingTopic")]
  pub region: String,
  pub user_topics: Vec<String>,
  pub view_mode: ViewMode,
  /// Key for the AI summary API. Stored in plaintext alongside the rest.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub api_key: Option<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      default_summary_length: SummaryLength::Short,
      save_history: true,
      region: constants().default_region.clone(),
      user_topics: Vec::new(),
      view_mode: ViewMode::Trending,
      api_key: None,
    }
  }
}

impl Settings {
  /// The API key, if one is set and not blank.
  pub fn api_key(&self) -> Option<&str> {
    self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
  }
}

/// A partial update: `Some` fields replace the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsPatch {
  pub default_summary_length: Option<SummaryLength>,
  pub save_history: Option<bool>,
  pub region: Option<String>,
  pub user_topics: Option<Vec<String>>,
  pub view_mode: Option<ViewMode>,
  /// `Some("")` clears the key.
  pub api_key: Option<String>,
}

impl SettingsPatch {
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  fn apply_to(self, base: &Settings) -> Settings {
    let mut next = base.clone();
    if let Some(v) = self.default_summary_length {
      next.default_summary_length = v;
    }
    if let Some(v) = self.save_history {
      next.save_history = v;
    }
    if let Some(v) = self.region {
      next.region = v;
    }
    if let Some(v) = self.user_topics {
      next.user_topics = v;
    }
    if let Some(v) = self.view_mode {
      next.view_mode = v;
    }
    if let Some(v) = self.api_key {
      next.api_key = if v.is_empty() { None } else { Some(v) };
    }
    next
  }
}

/// Overlay persisted keys on the defaults one at a time.
///
/// A key whose value does not fit its field keeps the default; the other
/// keys still apply.
fn merge_over_defaults(persisted: Map<String, Value>) -> Settings {
  let mut merged = match serde_json::to_value(Settings::default()) {
    Ok(Value::Object(map)) => map,
    _ => Map::new(),
  };
  for (field, value) in persisted {
    let mut candidate = merged.clone();
    candidate.insert(field.clone(), value);
    if serde_json::from_value::<Settings>(Value::Object(candidate.clone())).is_ok() {
      merged = candidate;
    } else {
      warn!(field = %field, "settings: ignoring persisted value of unexpected type");
    }
  }
  serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

/// Holds the current settings snapshot and persists every change.
pub struct SettingsStore {
  storage: Arc<dyn Storage>,
  current: Arc<Settings>,
}

impl SettingsStore {
  /// Load persisted settings merged over the defaults.
  ///
  /// A corrupted blob is removed and the defaults are used instead.
  pub fn load(storage: Arc<dyn Storage>) -> Self {
    let key = &constants().settings_key;
    let settings = match storage.get_item(key) {
      Some(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
        Ok(persisted) => merge_over_defaults(persisted),
        Err(e) => {
          warn!(err = %e, "settings: failed to parse persisted settings, using defaults");
          discard(storage.as_ref(), key);
          Settings::default()
        }
      },
      None => Settings::default(),
    };
    let store = Self { storage, current: Arc::new(settings) };
    store.persist();
    store
  }

  pub fn current(&self) -> Arc<Settings> {
    Arc::clone(&self.current)
  }

  /// Merge `patch` into the current settings and return the new snapshot.
  pub fn update(&mut self, patch: SettingsPatch) -> Arc<Settings> {
    let next = patch.apply_to(&self.current);
    debug!(?next, "settings: updated");
    self.current = Arc::new(next);
    self.persist();
    self.current()
  }

  /// Append a topic. Blank input and exact duplicates are ignored.
  pub fn add_topic(&mut self, topic: &str) -> Arc<Settings> {
    let topic = topic.trim();
    if topic.is_empty() || self.current.user_topics.iter().any(|t| t == topic) {
      return self.current();
    }
    let mut topics = self.current.user_topics.clone();
    topics.push(topic.to_string());
    self.update(SettingsPatch { user_topics: Some(topics), ..SettingsPatch::default() })
  }

  pub fn remove_topic(&mut self, topic: &str) -> Arc<Settings> {
    if !self.current.user_topics.iter().any(|t| t == topic) {
      return self.current();
    }
    let topics = self.current.user_topics.iter().filter(|t| *t != topic).cloned().collect();
    self.update(SettingsPatch { user_topics: Some(topics), ..SettingsPatch::default() })
  }

  fn persist(&self) {
    persist_json(self.storage.as_ref(), &constants().settings_key, self.current.as_ref());
  }
}
