use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::constants::constants;

/// A video as shown in feeds, favorites and history.
///
/// Two records describe the same video when their `id`s match; the other
/// fields may differ depending on which endpoint produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Video {
  pub id: String,
  pub title: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail: Option<String>,
  #[serde(default)]
  pub short_summary: String,
  #[serde(default)]
  pub long_summary: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub transcript_url: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub transcript_content: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ai_summary: Option<String>,
}

impl Video {
  /// Minimal card data: what a list entry carries before details are fetched.
  pub fn card(id: impl Into<String>, title: impl Into<String>) -> Self {
    Self { id: id.into(), title: title.into(), ..Self::default() }
  }

  pub fn watch_url(&self) -> String {
    format!("{}{}", constants().watch_url_base, self.id)
  }
}

/// Append `incoming` to `list`, skipping identifiers already present.
///
/// The first occurrence of an identifier wins and keeps its position;
/// duplicates inside `incoming` are dropped as well. Returns how many
/// videos were actually added.
pub fn append_unique(list: &mut Vec<Video>, incoming: Vec<Video>) -> usize {
  let mut seen: HashSet<String> = list.iter().map(|v| v.id.clone()).collect();
  let before = list.len();
  for video in incoming {
    if seen.insert(video.id.clone()) {
      list.push(video);
    }
  }
  list.len() - before
}

/// Move `item` to the front of `list`, removing any earlier entry with the same key.
pub fn promote_to_front<T, K: PartialEq>(list: &mut Vec<T>, item: T, key: impl Fn(&T) -> K) {
  let k = key(&item);
  list.retain(|existing| key(existing) != k);
  list.insert(0, item);
}
