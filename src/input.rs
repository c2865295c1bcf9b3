use crate::youtube::extract_video_id;

/// What the user typed into the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
  Blank,
  /// A pasted video link, looked up directly.
  Url { id: String },
  Text(String),
}

impl Query {
  pub fn parse(input: &str) -> Self {
    let trimmed = input.trim();
    if trimmed.is_empty() {
      return Query::Blank;
    }
    match extract_video_id(trimmed) {
      Some(id) => Query::Url { id },
      None => Query::Text(trimmed.to_string()),
    }
  }

  pub fn is_url(&self) -> bool {
    matches!(self, Query::Url { .. })
  }
}

/// Whether `s` has the shape of a bare video id.
pub fn is_bare_video_id(s: &str) -> bool {
  s.chars().count() == 11 && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Resolve a video link or bare id to an id.
pub fn parse_video_ref(input: &str) -> Option<String> {
  let trimmed = input.trim();
  extract_video_id(trimmed).or_else(|| is_bare_video_id(trimmed).then(|| trimmed.to_string()))
}
