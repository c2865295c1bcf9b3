use reqwest::Client;
use tracing::{info, warn};

use crate::constants::constants;
use crate::youtube::FetchError;

/// What the detail view knows about a video's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TranscriptState {
  /// Not requested yet.
  #[default]
  Pending,
  /// Transcript body fetched as plain text.
  Available(String),
  /// No pointer, or the fetch failed.
  Unavailable,
}

impl TranscriptState {
  pub fn text(&self) -> Option<&str> {
    match self {
      TranscriptState::Available(text) => Some(text),
      _ => None,
    }
  }

  /// Text to show: the transcript itself or a placeholder.
  pub fn display_text(&self) -> &str {
    match self {
      TranscriptState::Available(text) => text,
      TranscriptState::Pending => "Loading transcript...",
      TranscriptState::Unavailable => &constants().transcript_unavailable,
    }
  }
}

/// Fetch a transcript body from the provider's subtitle URL.
pub async fn fetch_transcript(client: &Client, url: &str) -> Result<String, FetchError> {
  let response = client.get(url).send().await?;
  let status = response.status();
  if !status.is_success() {
    return Err(FetchError::Status { status, url: url.to_string() });
  }
  Ok(response.text().await?)
}

/// Resolve the transcript for an optional pointer; never fails.
pub async fn load_transcript(client: &Client, pointer: Option<&str>) -> TranscriptState {
  let Some(url) = pointer else {
    info!("transcript: no subtitle track available");
    return TranscriptState::Unavailable;
  };
  match fetch_transcript(client, url).await {
    Ok(text) => {
      info!(url, len = text.len(), "transcript: fetched");
      TranscriptState::Available(text)
    }
    Err(e) => {
      warn!(url, err = %e, "transcript: fetch failed");
      TranscriptState::Unavailable
    }
  }
}
