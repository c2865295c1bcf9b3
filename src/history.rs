use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::constants;
use crate::notify::Toaster;
use crate::storage::{Storage, discard, persist_json};
use crate::video::{Video, promote_to_front};

/// Watch history and search history, both gated by the save-history preference.
pub struct HistoryStore {
  storage: Arc<dyn Storage>,
  toaster: Toaster,
  save_history: bool,
  watched: Vec<Video>,
  searches: Vec<String>,
}

/// Read a persisted list, removing it when it fails to parse.
fn load_list<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Vec<T> {
  let Some(raw) = storage.get_item(key) else { return Vec::new() };
  match serde_json::from_str(&raw) {
    Ok(list) => list,
    Err(e) => {
      warn!(key, err = %e, "history: failed to parse persisted list, discarding");
      discard(storage, key);
      Vec::new()
    }
  }
}

impl HistoryStore {
  /// Load persisted history when saving is enabled; otherwise drop whatever is stored.
  pub fn load(storage: Arc<dyn Storage>, save_history: bool, toaster: Toaster) -> Self {
    let c = constants();
    let (watched, searches) = if save_history {
      (load_list(storage.as_ref(), &c.history_key), load_list(storage.as_ref(), &c.search_history_key))
    } else {
      discard(storage.as_ref(), &c.history_key);
      discard(storage.as_ref(), &c.search_history_key);
      (Vec::new(), Vec::new())
    };
    debug!(watched = watched.len(), searches = searches.len(), save_history, "history: loaded");
    Self { storage, toaster, save_history, watched, searches }
  }

  /// Most recently watched first.
  pub fn entries(&self) -> &[Video] {
    &self.watched
  }

  /// Most recent query first.
  pub fn searches(&self) -> &[String] {
    &self.searches
  }

  pub fn save_history(&self) -> bool {
    self.save_history
  }

  /// Follow a change of the save-history preference.
  ///
  /// Disabling removes persisted history at once; the in-memory lists stay
  /// for the rest of the session and are written back if saving is re-enabled.
  pub fn set_save_history(&mut self, enabled: bool) {
    if enabled == self.save_history {
      return;
    }
    self.save_history = enabled;
    info!(enabled, "history: save-history changed");
    if enabled {
      self.persist_watched();
      self.persist_searches();
    } else {
      discard(self.storage.as_ref(), &constants().history_key);
      discard(self.storage.as_ref(), &constants().search_history_key);
    }
  }

  pub fn add_to_history(&mut self, video: &Video) {
    if !self.save_history {
      return;
    }
    promote_to_front(&mut self.watched, video.clone(), |v| v.id.clone());
    self.persist_watched();
    self.toaster.toast("Added to history", format!("\"{}\" has been added to your viewing history.", video.title));
  }

  pub fn clear_history(&mut self) {
    self.watched.clear();
    discard(self.storage.as_ref(), &constants().history_key);
    self.toaster.toast("History cleared", "Your viewing history has been cleared.");
  }

  pub fn add_to_search_history(&mut self, query: &str) {
    if !self.save_history || query.trim().is_empty() {
      return;
    }
    promote_to_front(&mut self.searches, query.to_string(), String::clone);
    self.persist_searches();
    self.toaster.toast("Search saved", format!("\"{}\" has been added to your search history.", query));
  }

  pub fn clear_search_history(&mut self) {
    self.searches.clear();
    discard(self.storage.as_ref(), &constants().search_history_key);
    self.toaster.toast("Search history cleared", "Your search history has been cleared.");
  }

  fn persist_watched(&self) {
    if self.save_history {
      persist_json(self.storage.as_ref(), &constants().history_key, &self.watched);
    }
  }

  fn persist_searches(&self) {
    if self.save_history {
      persist_json(self.storage.as_ref(), &constants().search_history_key, &self.searches);
    }
  }
}
