use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::detail::VideoDetail;
use crate::notify::Toast;
use crate::settings::{Settings, SummaryLength};
use crate::video::Video;

/// Column width used when the terminal size is unknown.
pub const DEFAULT_WIDTH: usize = 80;

// --- Helpers ---

/// Columns of the attached terminal, or `DEFAULT_WIDTH` when there is none.
pub fn terminal_width() -> usize {
  width_or_default(crossterm::terminal::size().ok().map(|(cols, _)| cols))
}

fn width_or_default(cols: Option<u16>) -> usize {
  cols.filter(|c| *c > 0).map(usize::from).unwrap_or(DEFAULT_WIDTH)
}

/// Terminal columns taken by `s` (double-width CJK counts twice).
pub fn display_width(s: &str) -> usize {
  UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` columns, appending "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
  if display_width(s) <= max_width {
    return s.to_string();
  }
  let budget = max_width.saturating_sub(1);
  let mut used = 0;
  let mut out = String::new();
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > budget {
      break;
    }
    used += w;
    out.push(c);
  }
  out.push('…');
  out
}

/// Show only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
  let count = secret.chars().count();
  if count <= 4 {
    return "*".repeat(count);
  }
  let tail: String = secret.chars().skip(count - 4).collect();
  format!("{}{}", "*".repeat(count - 4), tail)
}

// --- Lists ---

/// One numbered line per video: index, favorite marker, title and id.
pub fn render_video_list(videos: &[Video], is_favorite: impl Fn(&str) -> bool, width: usize) -> String {
  if videos.is_empty() {
    return "No videos found.".to_string();
  }
  let index_width = videos.len().to_string().len();
  let mut out = String::new();
  for (i, video) in videos.iter().enumerate() {
    let marker = if is_favorite(&video.id) { "★" } else { " " };
    let prefix = format!("{:>w$}. {} ", i + 1, marker, w = index_width);
    let suffix = format!("  [{}]", video.id);
    let room = width.saturating_sub(display_width(&prefix) + display_width(&suffix)).max(10);
    let title = if video.title.is_empty() { "(untitled)" } else { &video.title };
    let _ = writeln!(out, "{}{}{}", prefix, truncate_str(title, room), suffix);
  }
  out
}

/// Footer telling the user whether another page can be requested.
pub fn render_more_hint(has_more: bool) -> &'static str {
  if has_more { "More results available (use --pages to fetch more)." } else { "End of results." }
}

pub fn render_searches(queries: &[String]) -> String {
  if queries.is_empty() {
    return "No saved searches.".to_string();
  }
  queries.iter().enumerate().map(|(i, q)| format!("{:>2}. {}\n", i + 1, q)).collect()
}

// --- Detail ---

pub fn render_detail(detail: &VideoDetail, length: SummaryLength, favorite: bool, width: usize) -> String {
  let video = &detail.video;
  let rule = "─".repeat(width.min(DEFAULT_WIDTH));
  let mut out = String::new();
  let star = if favorite { " ★" } else { "" };
  let _ = writeln!(out, "{}{}", video.title, star);
  let _ = writeln!(out, "{}", video.watch_url());
  if let Some(ref thumb) = video.thumbnail {
    let _ = writeln!(out, "Thumbnail: {}", thumb);
  }
  let _ = writeln!(out, "{}", rule);
  let heading = match length {
    SummaryLength::Short => "Summary",
    SummaryLength::Long => "Description",
  };
  let _ = writeln!(out, "{}:\n{}", heading, detail.summary(length));
  if let Some(ai) = detail.ai_summary() {
    let _ = writeln!(out, "{}\nAI summary:\n{}", rule, ai);
  }
  let _ = writeln!(out, "{}\nTranscript:\n{}", rule, detail.transcript.display_text());
  out
}

// --- Settings ---

pub fn render_settings(settings: &Settings) -> String {
  let topics = if settings.user_topics.is_empty() { "(none)".to_string() } else { settings.user_topics.join(", ") };
  let key = settings.api_key().map(mask_secret).unwrap_or_else(|| "(not set)".to_string());
  let mut out = String::new();
  let _ = writeln!(out, "region:          {}", settings.region);
  let _ = writeln!(out, "view mode:       {:?}", settings.view_mode);
  let _ = writeln!(out, "topics:          {}", topics);
  let _ = writeln!(out, "save history:    {}", settings.save_history);
  let _ = writeln!(out, "summary length:  {:?}", settings.default_summary_length);
  let _ = writeln!(out, "api key:         {}", key);
  out
}

/// Settings with the API key masked, for machine-readable output.
pub fn redacted_settings(settings: &Settings) -> Settings {
  Settings { api_key: settings.api_key().map(mask_secret), ..settings.clone() }
}

pub fn render_toast(toast: &Toast) -> String {
  format!("✔ {}: {}", toast.title, toast.description)
}
