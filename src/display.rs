use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
  /// Human-readable text.
  #[default]
  Text,
  /// Pretty-printed JSON for scripting.
  Json,
}

impl OutputFormat {
  pub fn label(self) -> &'static str {
    match self {
      OutputFormat::Text => "text",
      OutputFormat::Json => "json",
    }
  }

  /// Render `value` in this format; `text` builds the human-readable form.
  pub fn render<T: Serialize + ?Sized>(self, value: &T, text: impl FnOnce() -> String) -> Result<String> {
    match self {
      OutputFormat::Text => Ok(text()),
      OutputFormat::Json => serde_json::to_string_pretty(value).context("Failed to serialize output"),
    }
  }

  /// Render and write to `out`, newline-terminated.
  pub fn emit<T: Serialize + ?Sized>(self, out: &mut impl Write, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    let rendered = self.render(value, text)?;
    if rendered.is_empty() {
      return Ok(());
    }
    writeln!(out, "{}", rendered.trim_end_matches('\n')).context("Failed to write output")
  }
}
