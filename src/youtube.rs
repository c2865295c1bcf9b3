use regex::Regex;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::video::Video;

/// Failures talking to the video index, the transcript host or the AI API.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("request failed: {0}")]
  Request(#[from] reqwest::Error),
  #[error("HTTP {status} from {url}")]
  Status { status: StatusCode, url: String },
  /// The provider says the video does not exist or cannot be played.
  #[error("video unavailable: {0}")]
  Unavailable(String),
  #[error("malformed response: {0}")]
  Decode(#[from] serde_json::Error),
  #[error("response carried no usable content")]
  NoContent,
  #[error("invalid URL {0}")]
  InvalidUrl(String),
}

impl FetchError {
  pub fn is_unavailable(&self) -> bool {
    matches!(self, FetchError::Unavailable(_))
  }
}

// --- Video-ID extraction ---

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^.*((youtu.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*").expect("video id pattern is valid")
});

/// Length of a YouTube video identifier.
const VIDEO_ID_LEN: usize = 11;

/// Extract an 11-character video id from a YouTube URL.
///
/// Only inputs mentioning `youtube.com` or `youtu.be` are considered.
pub fn extract_video_id(input: &str) -> Option<String> {
  if !input.contains("youtube.com") && !input.contains("youtu.be") {
    return None;
  }
  let caps = VIDEO_ID_RE.captures(input)?;
  let id = caps.get(7)?.as_str();
  (id.chars().count() == VIDEO_ID_LEN).then(|| id.to_string())
}

/// Pull the id out of a provider-relative watch URL such as `/watch?v=abc`.
fn id_from_watch_url(url: &str) -> Option<String> {
  url.split('=').nth(1).filter(|s| !s.is_empty()).map(|s| s.to_string())
}

// --- Provider payloads ---

/// A stream entry from `/trending` or `/search`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamItem {
  url: Option<String>,
  title: Option<String>,
  thumbnail: Option<String>,
  short_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchPage {
  #[serde(default)]
  items: Vec<StreamItem>,
}

#[derive(Debug, Deserialize)]
struct Subtitle {
  url: Option<String>,
}

/// The `/streams/{id}` payload, reduced to what the detail view needs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamDetails {
  title: Option<String>,
  description: Option<String>,
  thumbnail_url: Option<String>,
  #[serde(default)]
  subtitles: Vec<Subtitle>,
}

fn map_items(items: Vec<StreamItem>) -> Vec<Video> {
  items
    .into_iter()
    .filter_map(|item| {
      let Some(id) = item.url.as_deref().and_then(id_from_watch_url) else {
        debug!(url = ?item.url, "piped: skipping item without a video id");
        return None;
      };
      Some(Video {
        id,
        title: item.title.unwrap_or_default(),
        thumbnail: item.thumbnail,
        short_summary: item.short_description.unwrap_or_default(),
        ..Video::default()
      })
    })
    .collect()
}

/// Phrases the provider uses when a video cannot be served at all.
const UNAVAILABLE_MARKERS: [&str; 3] = ["Video unavailable", "This video is unavailable", "Unable to extract video data"];

/// Client for a Piped-compatible video index.
#[derive(Debug, Clone)]
pub struct PipedClient {
  http: Client,
  base_url: String,
}

impl PipedClient {
  pub fn new(http: Client, base_url: impl Into<String>) -> Self {
    Self { http, base_url: base_url.into().trim_end_matches('/').to_string() }
  }

  /// Build the shared HTTP client, with an optional per-request timeout.
  pub fn http_client(timeout: Option<Duration>) -> Result<Client, FetchError> {
    let mut builder = Client::builder().user_agent(concat!("youtok/", env!("CARGO_PKG_VERSION")));
    if let Some(t) = timeout {
      builder = builder.timeout(t);
    }
    Ok(builder.build()?)
  }

  pub fn http(&self) -> &Client {
    &self.http
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, FetchError> {
    let raw = format!("{}{}", self.base_url, path);
    let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !query.is_empty() {
      url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
    debug!(url = %url, "piped: GET");
    let response = self.http.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status { status, url: url.to_string() });
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
  }

  // --- Fallible forms ---

  pub async fn try_fetch_trending_videos(&self, region: &str, page: u32) -> Result<Vec<Video>, FetchError> {
    let page = page.to_string();
    let url = self.endpoint("/trending", &[("region", region), ("page", &page)])?;
    let items: Vec<StreamItem> = self.get_json(url).await?;
    Ok(map_items(items))
  }

  pub async fn try_search(&self, query: &str, page: u32) -> Result<Vec<Video>, FetchError> {
    let page = page.to_string();
    let url = self.endpoint("/search", &[("q", query), ("filter", "videos"), ("page", &page)])?;
    let result: SearchPage = self.get_json(url).await?;
    Ok(map_items(result.items))
  }

  /// Look up one video through a URL the user pasted.
  pub async fn try_search_by_url(&self, input: &str) -> Result<Vec<Video>, FetchError> {
    let Some(video_id) = extract_video_id(input) else {
      debug!(input, "piped: no video id in URL");
      return Ok(Vec::new());
    };
    Ok(vec![self.fetch_video_details(&video_id).await?])
  }

  /// Fetch extended metadata and the transcript pointer for one video.
  pub async fn fetch_video_details(&self, video_id: &str) -> Result<Video, FetchError> {
    let url = self.endpoint(&format!("/streams/{}", video_id), &[])?;
    debug!(url = %url, "piped: GET");
    let response = self.http.get(url.clone()).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let unavailable = status == StatusCode::NOT_FOUND
      || (!status.is_success() && UNAVAILABLE_MARKERS.iter().any(|m| body.contains(m)));
    if unavailable {
      info!(video_id, %status, "piped: video unavailable");
      return Err(FetchError::Unavailable(video_id.to_string()));
    }
    if !status.is_success() {
      return Err(FetchError::Status { status, url: url.to_string() });
    }

    let details: StreamDetails = serde_json::from_str(&body)?;
    let description = details.description.unwrap_or_default();
    Ok(Video {
      id: video_id.to_string(),
      title: details.title.unwrap_or_default(),
      thumbnail: details.thumbnail_url,
      short_summary: description.clone(),
      long_summary: description,
      transcript_url: details.subtitles.into_iter().next().and_then(|s| s.url),
      ..Video::default()
    })
  }

  // --- Never-failing forms: errors are logged and become empty lists ---

  pub async fn fetch_trending_videos(&self, region: &str, page: u32) -> Vec<Video> {
    self.try_fetch_trending_videos(region, page).await.unwrap_or_else(|e| {
      warn!(region, page, err = %e, "piped: error fetching trending videos");
      Vec::new()
    })
  }

  pub async fn fetch_videos_by_topic(&self, topic: &str, page: u32) -> Vec<Video> {
    self.try_search(topic, page).await.unwrap_or_else(|e| {
      warn!(topic, page, err = %e, "piped: error fetching videos by topic");
      Vec::new()
    })
  }

  /// Search by text, or look up a single video when `is_url` is set.
  pub async fn search_videos(&self, query: &str, is_url: bool, page: u32) -> Vec<Video> {
    let result = if is_url { self.try_search_by_url(query).await } else { self.try_search(query, page).await };
    result.unwrap_or_else(|e| {
      warn!(query, is_url, page, err = %e, "piped: error searching videos");
      Vec::new()
    })
  }
}
