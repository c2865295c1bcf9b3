//! The detail view's data: extended metadata, transcript and an optional AI summary.
//!
//! Only the metadata fetch can fail the view. Transcript and summary problems
//! degrade to placeholders.

use tracing::{info, warn};

use crate::constants::constants;
use crate::settings::SummaryLength;
use crate::summary::Summarizer;
use crate::transcript::{TranscriptState, load_transcript};
use crate::video::Video;
use crate::youtube::{FetchError, PipedClient};

/// Everything the detail view shows for one video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetail {
  pub video: Video,
  pub transcript: TranscriptState,
}

impl VideoDetail {
  pub fn summary(&self, length: SummaryLength) -> &str {
    let text = match length {
      SummaryLength::Short => &self.video.short_summary,
      SummaryLength::Long => &self.video.long_summary,
    };
    if text.is_empty() { &constants().summary_unavailable } else { text }
  }

  pub fn ai_summary(&self) -> Option<&str> {
    self.video.ai_summary.as_deref()
  }
}

/// Overlay fetched metadata on the card the caller already holds.
///
/// Identity comes from the card; any field the metadata fetch returned
/// replaces the card's value.
pub fn merge_details(card: &Video, fetched: Video) -> Video {
  let mut merged = card.clone();
  if !fetched.title.is_empty() {
    merged.title = fetched.title;
  }
  if fetched.thumbnail.is_some() {
    merged.thumbnail = fetched.thumbnail;
  }
  if !fetched.short_summary.is_empty() {
    merged.short_summary = fetched.short_summary;
  }
  if !fetched.long_summary.is_empty() {
    merged.long_summary = fetched.long_summary;
  }
  if fetched.transcript_url.is_some() {
    merged.transcript_url = fetched.transcript_url;
  }
  merged
}

/// Loads detail views from the video index and the AI API.
#[derive(Debug, Clone)]
pub struct DetailFetcher {
  piped: PipedClient,
  summarizer: Summarizer,
}

impl DetailFetcher {
  pub fn new(piped: PipedClient, summarizer: Summarizer) -> Self {
    Self { piped, summarizer }
  }

  /// Load the detail view for `card`.
  ///
  /// Fails only when the metadata fetch fails; a missing transcript or a
  /// failed summary leave the corresponding fields unset.
  pub async fn load(&self, card: &Video, api_key: Option<&str>) -> Result<VideoDetail, FetchError> {
    let fetched = self.piped.fetch_video_details(&card.id).await.inspect_err(|e| {
      warn!(id = %card.id, err = %e, "detail: metadata fetch failed");
    })?;
    let mut video = merge_details(card, fetched);

    let transcript = load_transcript(self.piped.http(), video.transcript_url.as_deref()).await;
    video.transcript_content = transcript.text().map(str::to_string);

    video.ai_summary = match (transcript.text(), api_key.map(str::trim).filter(|k| !k.is_empty())) {
      (Some(text), Some(key)) => self.summarizer.generate_summary(text, key).await,
      (Some(_), None) => {
        info!(id = %video.id, "detail: no API key, skipping AI summary");
        None
      }
      _ => None,
    };

    Ok(VideoDetail { video, transcript })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use reqwest::Client;
  use serde_json::json;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn fetcher(server: &MockServer) -> DetailFetcher {
    let http = Client::new();
    DetailFetcher::new(
      PipedClient::new(http.clone(), server.uri()),
      Summarizer::new(http, server.uri(), "gemini-2.0-flash"),
    )
  }

  fn card() -> Video {
    Video {
      thumbnail: Some("https://i.ytimg.com/card.jpg".to_string()),
      short_summary: "card summary".to_string(),
      ..Video::card("dQw4w9WgXcQ", "Card title")
    }
  }

  async fn mount_streams(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
      .and(path("/streams/dQw4w9WgXcQ"))
      .respond_with(ResponseTemplate::new(200).set_body_json(body))
      .mount(server)
      .await;
  }

  #[test]
  fn merge_prefers_fetched_fields_but_keeps_identity() {
    let fetched = Video {
      id: "ignored".to_string(),
      title: "Fetched title".to_string(),
      long_summary: "long".to_string(),
      ..Video::default()
    };
    let merged = merge_details(&card(), fetched);
    assert_eq!(merged.id, "dQw4w9WgXcQ");
    assert_eq!(merged.title, "Fetched title");
    assert_eq!(merged.thumbnail.as_deref(), Some("https://i.ytimg.com/card.jpg"));
    assert_eq!(merged.short_summary, "card summary");
    assert_eq!(merged.long_summary, "long");
  }

  #[tokio::test]
  async fn full_flow_with_transcript_and_summary() {
    let server = MockServer::start().await;
    mount_streams(
      &server,
      json!({
        "title": "Never Gonna Give You Up",
        "description": "desc",
        "thumbnailUrl": "https://i.ytimg.com/max.jpg",
        "subtitles": [{"url": format!("{}/subs/en.vtt", server.uri())}]
      }),
    )
    .await;
    Mock::given(method("GET"))
      .and(path("/subs/en.vtt"))
      .respond_with(ResponseTemplate::new(200).set_body_string("never gonna give you up"))
      .mount(&server)
      .await;
    Mock::given(method("POST"))
      .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{"content": {"parts": [{"text": "A song about commitment."}]}}]
      })))
      .mount(&server)
      .await;

    let detail = fetcher(&server).load(&card(), Some("key")).await.unwrap();
    assert_eq!(detail.video.title, "Never Gonna Give You Up");
    assert_eq!(detail.video.thumbnail.as_deref(), Some("https://i.ytimg.com/max.jpg"));
    assert_eq!(detail.video.transcript_content.as_deref(), Some("never gonna give you up"));
    assert_eq!(detail.ai_summary(), Some("A song about commitment."));
    assert_eq!(detail.summary(SummaryLength::Long), "desc");
  }

  #[tokio::test]
  async fn no_api_key_leaves_summary_unset() {
    let server = MockServer::start().await;
    mount_streams(&server, json!({"title": "T", "subtitles": [{"url": format!("{}/subs/en.vtt", server.uri())}]})).await;
    Mock::given(method("GET")).and(path("/subs/en.vtt")).respond_with(ResponseTemplate::new(200).set_body_string("words")).mount(&server).await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let detail = fetcher(&server).load(&card(), None).await.unwrap();
    assert_eq!(detail.transcript.text(), Some("words"));
    assert_eq!(detail.ai_summary(), None);
  }

  #[tokio::test]
  async fn missing_transcript_degrades_to_placeholder() {
    let server = MockServer::start().await;
    mount_streams(&server, json!({"title": "T", "description": ""})).await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let detail = fetcher(&server).load(&card(), Some("key")).await.unwrap();
    assert_eq!(detail.transcript, TranscriptState::Unavailable);
    assert_eq!(detail.transcript.display_text(), "Transcript not available");
    assert_eq!(detail.video.transcript_content, None);
    assert_eq!(detail.ai_summary(), None);
    // Card summary survives an empty fetched description.
    assert_eq!(detail.summary(SummaryLength::Short), "card summary");
    assert_eq!(detail.summary(SummaryLength::Long), "No summary available");
  }

  #[tokio::test]
  async fn failed_summary_does_not_fail_the_view() {
    let server = MockServer::start().await;
    mount_streams(&server, json!({"title": "T", "subtitles": [{"url": format!("{}/subs/en.vtt", server.uri())}]})).await;
    Mock::given(method("GET")).and(path("/subs/en.vtt")).respond_with(ResponseTemplate::new(200).set_body_string("words")).mount(&server).await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

    let detail = fetcher(&server).load(&card(), Some("key")).await.unwrap();
    assert_eq!(detail.ai_summary(), None);
    assert_eq!(detail.transcript.text(), Some("words"));
  }

  #[tokio::test]
  async fn unavailable_video_halts() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).and(path("/streams/dQw4w9WgXcQ")).respond_with(ResponseTemplate::new(404)).mount(&server).await;

    let err = fetcher(&server).load(&card(), Some("key")).await.unwrap_err();
    assert!(err.is_unavailable());
  }
}
