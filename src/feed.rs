//! Paginated video collections behind the feed and search views.
//!
//! Every collection (trending for a region, one topic, one search query) has
//! its own page counter, has-more flag and phase. A [`PagedList`] shows one
//! collection at a time. Requests are split into `begin_*` and [`PagedList::apply`]
//! so the fetch can happen anywhere; each request carries the list's generation
//! and responses from before the last reset are dropped.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use tracing::{debug, info, warn};

use crate::settings::{Settings, ViewMode};
use crate::video::{Video, append_unique};
use crate::youtube::{FetchError, PipedClient};

/// Identifies one paginated collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionKey {
  Trending { region: String },
  Topic(String),
  Search { query: String, is_url: bool },
}

impl fmt::Display for CollectionKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CollectionKey::Trending { region } => write!(f, "trending:{}", region),
      CollectionKey::Topic(topic) => write!(f, "topic:{}", topic),
      CollectionKey::Search { query, is_url: false } => write!(f, "search:{}", query),
      CollectionKey::Search { query, is_url: true } => write!(f, "url:{}", query),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
  #[default]
  Idle,
  Loading,
  Loaded,
  Error,
}

/// Pagination state of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
  /// Last page that produced items (1 until the first page lands).
  pub page: u32,
  pub has_more: bool,
  pub phase: Phase,
}

impl Default for PageState {
  fn default() -> Self {
    Self { page: 1, has_more: true, phase: Phase::Idle }
  }
}

/// A page fetch handed out by [`PagedList`]; feed the result back through `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
  pub key: CollectionKey,
  pub page: u32,
  generation: u64,
}

/// What applying a response did to the visible list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
  /// First page: the visible list was replaced.
  Replaced { count: usize },
  /// Later page: `added` new videos were appended after dedup.
  Appended { added: usize },
  /// Empty page: has-more is now false, list untouched.
  Exhausted,
  /// The fetch failed: has-more is now false.
  Failed,
  /// The response belongs to a collection that is no longer shown.
  Stale,
}

/// Where pages come from.
pub trait VideoSource {
  fn fetch_page(&self, key: &CollectionKey, page: u32) -> impl Future<Output = Result<Vec<Video>, FetchError>> + Send;
}

impl VideoSource for PipedClient {
  async fn fetch_page(&self, key: &CollectionKey, page: u32) -> Result<Vec<Video>, FetchError> {
    match key {
      CollectionKey::Trending { region } => self.try_fetch_trending_videos(region, page).await,
      CollectionKey::Topic(topic) => self.try_search(topic, page).await,
      CollectionKey::Search { query, is_url: false } => self.try_search(query, page).await,
      CollectionKey::Search { query, is_url: true } => self.try_search_by_url(query).await,
    }
  }
}

/// The visible list plus per-collection pagination state.
#[derive(Debug, Default)]
pub struct PagedList {
  videos: Vec<Video>,
  active: Option<CollectionKey>,
  states: HashMap<CollectionKey, PageState>,
  generation: u64,
}

impl PagedList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn videos(&self) -> &[Video] {
    &self.videos
  }

  pub fn active(&self) -> Option<&CollectionKey> {
    self.active.as_ref()
  }

  pub fn state(&self, key: &CollectionKey) -> Option<&PageState> {
    self.states.get(key)
  }

  pub fn active_state(&self) -> Option<&PageState> {
    self.active.as_ref().and_then(|k| self.states.get(k))
  }

  pub fn has_more(&self) -> bool {
    self.active_state().is_some_and(|s| s.has_more)
  }

  /// Make `key` the shown collection, starting over at page 1.
  ///
  /// The visible list is emptied right away and the key's state is reset even
  /// if it was exhausted before. Other collections keep their state, but any
  /// request still in flight becomes stale.
  pub fn begin_reset(&mut self, key: CollectionKey) -> PageRequest {
    self.generation += 1;
    for state in self.states.values_mut() {
      if state.phase == Phase::Loading {
        state.phase = Phase::Idle;
      }
    }
    self.states.insert(key.clone(), PageState { phase: Phase::Loading, ..PageState::default() });
    self.active = Some(key.clone());
    self.videos.clear();
    debug!(key = %key, generation = self.generation, "feed: reset");
    PageRequest { key, page: 1, generation: self.generation }
  }

  /// Ask for the next page of the shown collection.
  ///
  /// Returns `None` when nothing is shown, the collection is exhausted, or a
  /// request for it is already outstanding.
  pub fn begin_load_more(&mut self) -> Option<PageRequest> {
    let key = self.active.clone()?;
    let state = self.states.get_mut(&key)?;
    if !state.has_more || state.phase == Phase::Loading {
      return None;
    }
    state.phase = Phase::Loading;
    Some(PageRequest { page: state.page + 1, key, generation: self.generation })
  }

  /// Apply a fetch result for `request`.
  pub fn apply(&mut self, request: PageRequest, result: Result<Vec<Video>, FetchError>) -> PageOutcome {
    if request.generation != self.generation || self.active.as_ref() != Some(&request.key) {
      debug!(key = %request.key, page = request.page, "feed: dropping stale response");
      return PageOutcome::Stale;
    }
    let Some(state) = self.states.get_mut(&request.key) else {
      return PageOutcome::Stale;
    };

    let outcome = match result {
      Ok(videos) if request.page == 1 => {
        state.has_more = !videos.is_empty();
        state.page = 1;
        state.phase = Phase::Loaded;
        self.videos.clear();
        PageOutcome::Replaced { count: append_unique(&mut self.videos, videos) }
      }
      Ok(videos) if videos.is_empty() => {
        state.has_more = false;
        state.phase = Phase::Loaded;
        PageOutcome::Exhausted
      }
      Ok(videos) => {
        state.page = request.page;
        state.phase = Phase::Loaded;
        PageOutcome::Appended { added: append_unique(&mut self.videos, videos) }
      }
      Err(e) => {
        warn!(key = %request.key, page = request.page, err = %e, "feed: page fetch failed");
        state.has_more = false;
        state.phase = Phase::Error;
        if request.page == 1 {
          self.videos.clear();
        }
        PageOutcome::Failed
      }
    };
    info!(key = %request.key, page = request.page, ?outcome, total = self.videos.len(), "feed: page applied");
    outcome
  }

  /// Mark the shown collection as having no further pages.
  pub fn finish_active(&mut self) {
    if let Some(key) = self.active.clone()
      && let Some(state) = self.states.get_mut(&key)
    {
      state.has_more = false;
    }
  }

  /// Show nothing. In-flight requests become stale.
  pub fn clear(&mut self) {
    self.generation += 1;
    self.active = None;
    self.videos.clear();
  }

  /// Reset to `key` and fetch its first page.
  pub async fn load_first<S: VideoSource>(&mut self, source: &S, key: CollectionKey) -> PageOutcome {
    let request = self.begin_reset(key);
    let result = source.fetch_page(&request.key, request.page).await;
    self.apply(request, result)
  }

  /// Fetch and apply the next page, if one may be requested.
  pub async fn load_next<S: VideoSource>(&mut self, source: &S) -> Option<PageOutcome> {
    let request = self.begin_load_more()?;
    let result = source.fetch_page(&request.key, request.page).await;
    Some(self.apply(request, result))
  }
}

/// The home feed: trending for a region, or one of the user's topics.
#[derive(Debug, Default)]
pub struct Feed {
  list: PagedList,
}

impl Feed {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn list(&self) -> &PagedList {
    &self.list
  }

  pub fn videos(&self) -> &[Video] {
    self.list.videos()
  }

  pub fn has_more(&self) -> bool {
    self.list.has_more()
  }

  pub fn current_topic(&self) -> Option<&str> {
    match self.list.active() {
      Some(CollectionKey::Topic(topic)) => Some(topic),
      _ => None,
    }
  }

  /// The collection the feed opens on for these settings.
  pub fn initial_key(settings: &Settings) -> CollectionKey {
    match (settings.view_mode, settings.user_topics.first()) {
      (ViewMode::Topics, Some(topic)) => CollectionKey::Topic(topic.clone()),
      _ => CollectionKey::Trending { region: settings.region.clone() },
    }
  }

  /// Whether the shown collection is still what these settings call for.
  pub fn is_current_for(&self, settings: &Settings) -> bool {
    match self.list.active() {
      Some(CollectionKey::Topic(topic)) => {
        settings.view_mode == ViewMode::Topics && settings.user_topics.iter().any(|t| t == topic)
      }
      Some(key @ CollectionKey::Trending { .. }) => *key == Self::initial_key(settings),
      _ => false,
    }
  }

  pub async fn load_initial<S: VideoSource>(&mut self, source: &S, settings: &Settings) -> PageOutcome {
    self.list.load_first(source, Self::initial_key(settings)).await
  }

  /// Switch to `topic`. Returns `None` if it is already shown.
  pub async fn select_topic<S: VideoSource>(&mut self, source: &S, topic: &str) -> Option<PageOutcome> {
    if self.current_topic() == Some(topic) {
      return None;
    }
    Some(self.list.load_first(source, CollectionKey::Topic(topic.to_string())).await)
  }

  pub async fn select_region<S: VideoSource>(&mut self, source: &S, region: &str) -> PageOutcome {
    self.list.load_first(source, CollectionKey::Trending { region: region.to_string() }).await
  }

  pub async fn load_more<S: VideoSource>(&mut self, source: &S) -> Option<PageOutcome> {
    self.list.load_next(source).await
  }
}

/// Search results, independent of the home feed.
#[derive(Debug, Default)]
pub struct SearchFeed {
  list: PagedList,
  query: String,
}

impl SearchFeed {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn list(&self) -> &PagedList {
    &self.list
  }

  pub fn videos(&self) -> &[Video] {
    self.list.videos()
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn has_more(&self) -> bool {
    self.list.has_more()
  }

  /// Start a fresh search; page 1 always replaces the visible results.
  ///
  /// A blank query clears the results. URL lookups return at most one video
  /// and are never paged further.
  pub async fn search<S: VideoSource>(&mut self, source: &S, query: &str, is_url: bool) -> PageOutcome {
    self.query = query.to_string();
    let trimmed = query.trim();
    if trimmed.is_empty() {
      self.list.clear();
      return PageOutcome::Replaced { count: 0 };
    }
    let outcome = self.list.load_first(source, CollectionKey::Search { query: trimmed.to_string(), is_url }).await;
    if is_url {
      self.list.finish_active();
    }
    outcome
  }

  pub async fn load_more<S: VideoSource>(&mut self, source: &S) -> Option<PageOutcome> {
    self.list.load_next(source).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex as StdMutex;

  /// Serves canned pages; a missing page is an empty list, `None` is an error.
  #[derive(Default)]
  struct FakeSource {
    pages: HashMap<(CollectionKey, u32), Option<Vec<Video>>>,
    calls: StdMutex<Vec<(CollectionKey, u32)>>,
  }

  impl FakeSource {
    fn with(mut self, key: CollectionKey, page: u32, ids: &[&str]) -> Self {
      self.pages.insert((key, page), Some(ids.iter().map(|id| Video::card(*id, *id)).collect()));
      self
    }

    fn failing(mut self, key: CollectionKey, page: u32) -> Self {
      self.pages.insert((key, page), None);
      self
    }

    fn calls(&self) -> Vec<(CollectionKey, u32)> {
      self.calls.lock().unwrap().clone()
    }
  }

  impl VideoSource for FakeSource {
    async fn fetch_page(&self, key: &CollectionKey, page: u32) -> Result<Vec<Video>, FetchError> {
      self.calls.lock().unwrap().push((key.clone(), page));
      match self.pages.get(&(key.clone(), page)) {
        Some(Some(videos)) => Ok(videos.clone()),
        Some(None) => Err(FetchError::NoContent),
        None => Ok(Vec::new()),
      }
    }
  }

  fn topic(t: &str) -> CollectionKey {
    CollectionKey::Topic(t.to_string())
  }

  fn trending(r: &str) -> CollectionKey {
    CollectionKey::Trending { region: r.to_string() }
  }

  fn search(q: &str) -> CollectionKey {
    CollectionKey::Search { query: q.to_string(), is_url: false }
  }

  fn ids(videos: &[Video]) -> Vec<&str> {
    videos.iter().map(|v| v.id.as_str()).collect()
  }

  fn ten(prefix: &str) -> Vec<String> {
    (0..10).map(|i| format!("{}{}", prefix, i)).collect()
  }

  // --- PagedList ---

  #[tokio::test]
  async fn load_more_appends_with_dedup() {
    let source = FakeSource::default().with(trending("US"), 1, &["a", "b"]).with(trending("US"), 2, &["b", "c", "a", "d"]);
    let mut list = PagedList::new();

    assert_eq!(list.load_first(&source, trending("US")).await, PageOutcome::Replaced { count: 2 });
    assert_eq!(list.load_next(&source).await, Some(PageOutcome::Appended { added: 2 }));
    assert_eq!(ids(list.videos()), ["a", "b", "c", "d"]);
    assert_eq!(list.active_state().unwrap().page, 2);
    assert!(list.has_more());
  }

  #[tokio::test]
  async fn empty_page_exhausts_without_touching_list() {
    let source = FakeSource::default().with(trending("US"), 1, &["a", "b"]);
    let mut list = PagedList::new();
    list.load_first(&source, trending("US")).await;

    assert_eq!(list.load_next(&source).await, Some(PageOutcome::Exhausted));
    assert!(!list.has_more());
    assert_eq!(ids(list.videos()), ["a", "b"]);
    assert_eq!(list.active_state().unwrap().page, 1);

    // Exhausted collections issue no further requests.
    assert_eq!(list.load_next(&source).await, None);
    assert_eq!(source.calls().len(), 2);
    assert_eq!(ids(list.videos()), ["a", "b"]);
  }

  #[tokio::test]
  async fn failed_page_stops_pagination() {
    let source = FakeSource::default().with(trending("US"), 1, &["a"]).failing(trending("US"), 2);
    let mut list = PagedList::new();
    list.load_first(&source, trending("US")).await;

    assert_eq!(list.load_next(&source).await, Some(PageOutcome::Failed));
    assert!(!list.has_more());
    assert_eq!(list.active_state().unwrap().phase, Phase::Error);
    assert_eq!(ids(list.videos()), ["a"]);
  }

  #[tokio::test]
  async fn failed_first_page_leaves_empty_list() {
    let source = FakeSource::default().failing(trending("US"), 1);
    let mut list = PagedList::new();
    assert_eq!(list.load_first(&source, trending("US")).await, PageOutcome::Failed);
    assert!(list.videos().is_empty());
    assert!(!list.has_more());
  }

  #[tokio::test]
  async fn empty_first_page_has_no_more() {
    let source = FakeSource::default();
    let mut list = PagedList::new();
    assert_eq!(list.load_first(&source, trending("US")).await, PageOutcome::Replaced { count: 0 });
    assert!(!list.has_more());
  }

  #[test]
  fn only_one_request_outstanding_per_collection() {
    let mut list = PagedList::new();
    let first = list.begin_reset(trending("US"));
    assert_eq!(list.active_state().unwrap().phase, Phase::Loading);
    assert_eq!(list.begin_load_more(), None);

    list.apply(first, Ok(vec![Video::card("a", "a")]));
    let next = list.begin_load_more().unwrap();
    assert_eq!(next.page, 2);
    assert_eq!(list.begin_load_more(), None);
  }

  #[test]
  fn stale_response_is_discarded_after_reset() {
    let mut list = PagedList::new();
    let cats = list.begin_reset(topic("cats"));
    let dogs = list.begin_reset(topic("dogs"));

    // Cats resolves late, after the user moved on.
    assert_eq!(list.apply(cats, Ok(vec![Video::card("cat", "cat")])), PageOutcome::Stale);
    assert!(list.videos().is_empty());
    assert_eq!(list.state(&topic("cats")).unwrap().phase, Phase::Idle);

    assert_eq!(list.apply(dogs, Ok(vec![Video::card("dog", "dog")])), PageOutcome::Replaced { count: 1 });
    assert_eq!(ids(list.videos()), ["dog"]);
  }

  #[test]
  fn stale_load_more_is_discarded_after_reset_to_same_key() {
    let mut list = PagedList::new();
    let first = list.begin_reset(trending("US"));
    list.apply(first, Ok(vec![Video::card("a", "a")]));
    let more = list.begin_load_more().unwrap();

    let again = list.begin_reset(trending("US"));
    assert_eq!(list.apply(more, Ok(vec![Video::card("old", "old")])), PageOutcome::Stale);
    list.apply(again, Ok(vec![Video::card("b", "b")]));
    assert_eq!(ids(list.videos()), ["b"]);
  }

  #[test]
  fn clear_invalidates_in_flight_requests() {
    let mut list = PagedList::new();
    let req = list.begin_reset(search("lofi"));
    list.clear();
    assert_eq!(list.apply(req, Ok(vec![Video::card("a", "a")])), PageOutcome::Stale);
    assert!(list.videos().is_empty());
    assert!(!list.has_more());
  }

  // --- Feed ---

  #[tokio::test]
  async fn switching_topic_resets_exhausted_state() {
    let source = FakeSource::default().with(topic("cats"), 1, &["c1", "c2"]).with(topic("dogs"), 1, &["d1", "d2"]);
    let mut feed = Feed::new();

    feed.select_topic(&source, "cats").await;
    assert_eq!(feed.load_more(&source).await, Some(PageOutcome::Exhausted));
    assert!(!feed.has_more());

    assert_eq!(feed.select_topic(&source, "dogs").await, Some(PageOutcome::Replaced { count: 2 }));
    assert_eq!(ids(feed.videos()), ["d1", "d2"]);
    assert!(feed.has_more());
    assert_eq!(feed.current_topic(), Some("dogs"));

    // Cats keeps its own state.
    assert!(!feed.list().state(&topic("cats")).unwrap().has_more);
  }

  #[tokio::test]
  async fn selecting_current_topic_is_a_no_op() {
    let source = FakeSource::default().with(topic("cats"), 1, &["c1"]);
    let mut feed = Feed::new();
    feed.select_topic(&source, "cats").await;
    assert_eq!(feed.select_topic(&source, "cats").await, None);
    assert_eq!(source.calls().len(), 1);
  }

  #[tokio::test]
  async fn returning_to_a_topic_starts_over() {
    let source = FakeSource::default()
      .with(topic("cats"), 1, &["c1"])
      .with(topic("cats"), 2, &["c2"])
      .with(topic("dogs"), 1, &["d1"]);
    let mut feed = Feed::new();
    feed.select_topic(&source, "cats").await;
    feed.load_more(&source).await;
    feed.select_topic(&source, "dogs").await;
    feed.select_topic(&source, "cats").await;

    assert_eq!(ids(feed.videos()), ["c1"]);
    assert_eq!(feed.list().active_state().unwrap().page, 1);
  }

  #[tokio::test]
  async fn region_change_replaces_trending() {
    let source = FakeSource::default()
      .with(trending("US"), 1, &["us1"])
      .with(trending("US"), 2, &["us2"])
      .with(trending("IN"), 1, &["in1"]);
    let mut feed = Feed::new();
    feed.select_region(&source, "US").await;
    feed.load_more(&source).await;
    assert_eq!(ids(feed.videos()), ["us1", "us2"]);

    feed.select_region(&source, "IN").await;
    assert_eq!(ids(feed.videos()), ["in1"]);
    assert_eq!(feed.list().active_state().unwrap().page, 1);
    assert!(feed.has_more());
  }

  #[test]
  fn initial_key_follows_settings() {
    let mut settings = Settings::default();
    assert_eq!(Feed::initial_key(&settings), trending("US"));

    settings.view_mode = ViewMode::Topics;
    assert_eq!(Feed::initial_key(&settings), trending("US"));

    settings.user_topics = vec!["cats".to_string(), "dogs".to_string()];
    assert_eq!(Feed::initial_key(&settings), topic("cats"));

    settings.view_mode = ViewMode::Trending;
    settings.region = "JP".to_string();
    assert_eq!(Feed::initial_key(&settings), trending("JP"));
  }

  #[tokio::test]
  async fn current_for_tracks_settings() {
    let source = FakeSource::default().with(topic("dogs"), 1, &["d1"]);
    let mut feed = Feed::new();
    let mut settings = Settings { view_mode: ViewMode::Topics, ..Settings::default() };
    assert!(!feed.is_current_for(&settings));

    settings.user_topics = vec!["cats".to_string(), "dogs".to_string()];
    feed.select_topic(&source, "dogs").await;
    assert!(feed.is_current_for(&settings));

    settings.user_topics.retain(|t| t != "dogs");
    assert!(!feed.is_current_for(&settings));

    feed.select_region(&source, "US").await;
    settings.view_mode = ViewMode::Trending;
    assert!(feed.is_current_for(&settings));
    settings.region = "IN".to_string();
    assert!(!feed.is_current_for(&settings));
  }

  // --- SearchFeed ---

  #[tokio::test]
  async fn duplicate_pages_keep_paging_without_growing() {
    let page: Vec<String> = ten("lofi");
    let page_refs: Vec<&str> = page.iter().map(String::as_str).collect();
    let source = FakeSource::default().with(search("lofi"), 1, &page_refs).with(search("lofi"), 2, &page_refs);
    let mut results = SearchFeed::new();

    assert_eq!(results.search(&source, "lofi", false).await, PageOutcome::Replaced { count: 10 });
    assert_eq!(results.load_more(&source).await, Some(PageOutcome::Appended { added: 0 }));
    assert_eq!(results.videos().len(), 10);
    assert!(results.has_more());
  }

  #[tokio::test]
  async fn fresh_search_replaces_even_when_empty() {
    let source = FakeSource::default().with(search("lofi"), 1, &["a", "b"]);
    let mut results = SearchFeed::new();
    results.search(&source, "lofi", false).await;
    assert_eq!(results.videos().len(), 2);

    assert_eq!(results.search(&source, "lofi beats", false).await, PageOutcome::Replaced { count: 0 });
    assert!(results.videos().is_empty());
    assert!(!results.has_more());
  }

  #[tokio::test]
  async fn blank_search_clears_without_fetching() {
    let source = FakeSource::default().with(search("lofi"), 1, &["a"]);
    let mut results = SearchFeed::new();
    results.search(&source, "lofi", false).await;
    results.search(&source, "   ", false).await;

    assert!(results.videos().is_empty());
    assert!(!results.has_more());
    assert_eq!(results.query(), "   ");
    assert_eq!(source.calls().len(), 1);
  }

  #[tokio::test]
  async fn search_trims_query_for_fetch() {
    let source = FakeSource::default().with(search("lofi"), 1, &["a"]);
    let mut results = SearchFeed::new();
    results.search(&source, "  lofi ", false).await;
    assert_eq!(source.calls(), [(search("lofi"), 1)]);
  }

  #[tokio::test]
  async fn url_lookups_are_single_shot() {
    let url = "https://youtu.be/dQw4w9WgXcQ";
    let key = CollectionKey::Search { query: url.to_string(), is_url: true };
    let source = FakeSource::default().with(key, 1, &["dQw4w9WgXcQ"]);
    let mut results = SearchFeed::new();

    assert_eq!(results.search(&source, url, true).await, PageOutcome::Replaced { count: 1 });
    assert!(!results.has_more());
    assert_eq!(results.load_more(&source).await, None);
  }

  #[tokio::test]
  async fn search_and_feed_are_independent() {
    let source = FakeSource::default().with(trending("US"), 1, &["t1"]).with(search("lofi"), 1, &["s1"]);
    let mut feed = Feed::new();
    let mut results = SearchFeed::new();
    feed.select_region(&source, "US").await;
    results.search(&source, "lofi", false).await;

    assert_eq!(ids(feed.videos()), ["t1"]);
    assert_eq!(ids(results.videos()), ["s1"]);
  }

  #[test]
  fn keys_display_for_logs() {
    assert_eq!(trending("US").to_string(), "trending:US");
    assert_eq!(topic("cats").to_string(), "topic:cats");
    assert_eq!(search("lofi").to_string(), "search:lofi");
  }
}
