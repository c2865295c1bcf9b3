use std::sync::Arc;
use tracing::{debug, warn};

use crate::constants::constants;
use crate::notify::Toaster;
use crate::storage::{Storage, discard, persist_json};
use crate::video::Video;

/// Favorited videos, membership by id. Always persisted, regardless of save-history.
pub struct FavoritesStore {
  storage: Arc<dyn Storage>,
  toaster: Toaster,
  videos: Vec<Video>,
}

impl FavoritesStore {
  pub fn load(storage: Arc<dyn Storage>, toaster: Toaster) -> Self {
    let key = &constants().favorites_key;
    let videos = match storage.get_item(key) {
      Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(err = %e, "favorites: failed to parse persisted favorites, discarding");
        discard(storage.as_ref(), key);
        Vec::new()
      }),
      None => Vec::new(),
    };
    Self { storage, toaster, videos }
  }

  pub fn videos(&self) -> &[Video] {
    &self.videos
  }

  pub fn is_favorite(&self, id: &str) -> bool {
    self.videos.iter().any(|v| v.id == id)
  }

  /// Add the video if absent, remove it if present. Returns whether it is now a favorite.
  pub fn toggle_favorite(&mut self, video: &Video) -> bool {
    let now_favorite = if self.is_favorite(&video.id) {
      self.videos.retain(|v| v.id != video.id);
      self.toaster.toast("Removed from favorites", format!("\"{}\" has been removed from your favorites.", video.title));
      false
    } else {
      self.videos.push(video.clone());
      self.toaster.toast("Added to favorites", format!("\"{}\" has been added to your favorites.", video.title));
      true
    };
    debug!(id = %video.id, now_favorite, "favorites: toggled");
    persist_json(self.storage.as_ref(), &constants().favorites_key, &self.videos);
    now_favorite
  }
}
