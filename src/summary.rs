use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::constants::constants;
use crate::youtube::FetchError;

// --- Request/response payloads (Gemini `generateContent`) ---

#[derive(Debug, Serialize, Deserialize)]
struct Part {
  #[serde(default)]
  text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
  contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

/// Build the summarization prompt for a transcript.
pub fn summary_prompt(text: &str) -> String {
  format!("{}\n\n{}", constants().summary_prompt, text)
}

/// Client for a Gemini-compatible text generation API.
#[derive(Debug, Clone)]
pub struct Summarizer {
  http: Client,
  base_url: String,
  model: String,
}

impl Summarizer {
  pub fn new(http: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
    Self { http, base_url: base_url.into().trim_end_matches('/').to_string(), model: model.into() }
  }

  pub async fn try_generate_summary(&self, text: &str, api_key: &str) -> Result<String, FetchError> {
    let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
    let body = GenerateRequest { contents: vec![Content { parts: vec![Part { text: summary_prompt(text) }] }] };

    let response = self.http.post(&url).header("x-goog-api-key", api_key).json(&body).send().await?;
    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status { status, url });
    }
    let raw = response.text().await?;
    let parsed: GenerateResponse = serde_json::from_str(&raw)?;

    let summary: String = parsed
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content)
      .map(|c| c.parts.into_iter().map(|p| p.text).collect())
      .unwrap_or_default();
    if summary.trim().is_empty() {
      return Err(FetchError::NoContent);
    }
    Ok(summary)
  }

  /// Summarize `text`, or `None` when inputs are blank or the API call fails.
  pub async fn generate_summary(&self, text: &str, api_key: &str) -> Option<String> {
    if api_key.trim().is_empty() {
      warn!("summary: missing API key");
      return None;
    }
    if text.trim().is_empty() {
      warn!("summary: empty text, nothing to summarize");
      return None;
    }
    match self.try_generate_summary(text, api_key).await {
      Ok(summary) => {
        info!(model = %self.model, len = summary.len(), "summary: generated");
        Some(summary)
      }
      Err(e) => {
        warn!(model = %self.model, err = %e, "summary: generation failed");
        None
      }
    }
  }
}
