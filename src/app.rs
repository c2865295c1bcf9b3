use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::detail::{DetailFetcher, VideoDetail};
use crate::favorites::FavoritesStore;
use crate::feed::{Feed, PageOutcome, SearchFeed};
use crate::history::HistoryStore;
use crate::input::{Query, parse_video_ref};
use crate::notify::Toaster;
use crate::settings::{Settings, SettingsPatch, SettingsStore};
use crate::storage::Storage;
use crate::summary::Summarizer;
use crate::video::Video;
use crate::youtube::{FetchError, PipedClient};

/// Application state behind every front end: stores, feeds and providers.
pub struct App {
  settings: SettingsStore,
  history: HistoryStore,
  favorites: FavoritesStore,
  feed: Feed,
  results: SearchFeed,
  piped: PipedClient,
  detail: DetailFetcher,
  toaster: Toaster,
}

impl App {
  /// Build the app from configuration, with providers at the configured endpoints.
  pub fn new(config: &Config, storage: Arc<dyn Storage>, toaster: Toaster) -> Result<Self> {
    let http = PipedClient::http_client(config.request_timeout()).context("Failed to build HTTP client")?;
    let piped = PipedClient::new(http.clone(), config.api_base_url());
    let summarizer = Summarizer::new(http, config.ai_base_url(), config.ai_model());
    Ok(Self::with_clients(storage, toaster, piped, summarizer))
  }

  pub fn with_clients(storage: Arc<dyn Storage>, toaster: Toaster, piped: PipedClient, summarizer: Summarizer) -> Self {
    let settings = SettingsStore::load(Arc::clone(&storage));
    let history = HistoryStore::load(Arc::clone(&storage), settings.current().save_history, toaster.clone());
    let favorites = FavoritesStore::load(storage, toaster.clone());
    info!(
      api = piped.base_url(),
      history = history.entries().len(),
      favorites = favorites.videos().len(),
      "app: initialized"
    );
    Self {
      settings,
      history,
      favorites,
      feed: Feed::new(),
      results: SearchFeed::new(),
      detail: DetailFetcher::new(piped.clone(), summarizer),
      piped,
      toaster,
    }
  }

  pub fn settings(&self) -> Arc<Settings> {
    self.settings.current()
  }

  pub fn history(&self) -> &HistoryStore {
    &self.history
  }

  pub fn favorites(&self) -> &FavoritesStore {
    &self.favorites
  }

  pub fn feed(&self) -> &Feed {
    &self.feed
  }

  pub fn search_results(&self) -> &SearchFeed {
    &self.results
  }

  // --- Settings ---

  /// Merge `patch` into the settings, then bring history and the feed in line.
  pub async fn update_settings(&mut self, patch: SettingsPatch) -> Arc<Settings> {
    if patch.is_empty() {
      return self.settings();
    }
    let next = self.settings.update(patch);
    self.settings_changed(&next).await;
    next
  }

  pub async fn add_topic(&mut self, topic: &str) -> Arc<Settings> {
    let before = self.settings();
    let next = self.settings.add_topic(topic);
    if next != before {
      self.settings_changed(&next).await;
    }
    next
  }

  pub async fn remove_topic(&mut self, topic: &str) -> Arc<Settings> {
    let before = self.settings();
    let next = self.settings.remove_topic(topic);
    if next != before {
      self.settings_changed(&next).await;
    }
    next
  }

  async fn settings_changed(&mut self, next: &Settings) {
    self.history.set_save_history(next.save_history);
    self.toaster.toast("Settings updated", "Your preferences have been saved.");
    if self.feed.list().active().is_some() && !self.feed.is_current_for(next) {
      debug!("app: feed no longer matches settings, reloading");
      self.feed.load_initial(&self.piped, next).await;
    }
  }

  // --- Feed ---

  /// Load the first page of the feed the settings call for.
  pub async fn load_feed(&mut self) -> PageOutcome {
    let settings = self.settings();
    self.feed.load_initial(&self.piped, &settings).await
  }

  pub async fn select_topic(&mut self, topic: &str) -> Option<PageOutcome> {
    self.feed.select_topic(&self.piped, topic).await
  }

  /// Show trending for `region` without touching the saved region.
  pub async fn show_trending(&mut self, region: &str) -> PageOutcome {
    self.feed.select_region(&self.piped, region).await
  }

  pub async fn load_more_feed(&mut self) -> Option<PageOutcome> {
    self.feed.load_more(&self.piped).await
  }

  // --- Search ---

  /// Run a fresh search. Pasted video URLs are looked up directly; text
  /// queries are also recorded in search history.
  pub async fn search(&mut self, query: &str) -> PageOutcome {
    let parsed = Query::parse(query);
    if let Query::Text(ref text) = parsed {
      self.history.add_to_search_history(text);
    }
    self.results.search(&self.piped, query, parsed.is_url()).await
  }

  pub async fn load_more_results(&mut self) -> Option<PageOutcome> {
    self.results.load_more(&self.piped).await
  }

  // --- Videos ---

  /// Open the detail view for `card`, recording it in watch history.
  pub async fn open_video(&mut self, card: &Video) -> Result<VideoDetail, FetchError> {
    self.history.add_to_history(card);
    let settings = self.settings();
    self.detail.load(card, settings.api_key()).await
  }

  /// Open a video by id or pasted URL when no card is at hand.
  pub async fn open_video_by_id(&mut self, input: &str) -> Result<VideoDetail, FetchError> {
    let id = parse_video_ref(input).ok_or_else(|| FetchError::InvalidUrl(input.to_string()))?;
    let card = self.find_card(&id).cloned().unwrap_or_else(|| Video::card(id, String::new()));
    self.open_video(&card).await
  }

  /// A card already known for `id`, from any visible list or store.
  fn find_card(&self, id: &str) -> Option<&Video> {
    self
      .feed
      .videos()
      .iter()
      .chain(self.results.videos())
      .chain(self.favorites.videos())
      .chain(self.history.entries())
      .find(|v| v.id == id)
  }

  pub fn toggle_favorite(&mut self, video: &Video) -> bool {
    self.favorites.toggle_favorite(video)
  }

  /// Toggle a favorite by id or URL, fetching metadata for unknown videos.
  pub async fn toggle_favorite_by_id(&mut self, input: &str) -> Result<(Video, bool), FetchError> {
    let id = parse_video_ref(input).ok_or_else(|| FetchError::InvalidUrl(input.to_string()))?;
    let card = match self.find_card(&id).cloned() {
      Some(card) => card,
      None => self.piped.fetch_video_details(&id).await?,
    };
    let now_favorite = self.favorites.toggle_favorite(&card);
    Ok((card, now_favorite))
  }

  pub fn clear_history(&mut self) {
    self.history.clear_history();
  }

  pub fn clear_search_history(&mut self) {
    self.history.clear_search_history();
  }
}
