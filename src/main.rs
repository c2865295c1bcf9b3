use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use youtok::App;
use youtok::config::Config;
use youtok::constants::constants;
use youtok::display::OutputFormat;
use youtok::feed::PageOutcome;
use youtok::notify::{Toast, Toaster};
use youtok::settings::{SettingsPatch, SummaryLength, ViewMode};
use youtok::storage::FileStorage;
use youtok::ui;
use youtok::video::Video;
use youtok::youtube::FetchError;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Directory for persisted state and the log file (default: platform data dir)
  #[arg(long, global = true)]
  data_dir: Option<PathBuf>,

  /// Output format for command results
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Pages to fetch for feed, trending, topic and search
  #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
  pages: u32,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Home feed: trending for your region, or your first topic in topics mode
  Feed,
  /// Trending videos for a region
  Trending {
    /// Two-letter region code (default: the saved region)
    #[arg(short, long)]
    region: Option<String>,
  },
  /// Videos for a topic
  Topic { topic: String },
  /// Search by text, or look up a pasted video link
  Search {
    #[arg(required = true, num_args = 1..)]
    query: Vec<String>,
  },
  /// Video details, transcript and AI summary (recorded in history)
  Open {
    /// Video id or link
    video: String,
    /// Summary to show (default: the saved preference)
    #[arg(short, long, value_enum)]
    length: Option<SummaryLength>,
  },
  /// Add a video to favorites, or remove it if already there
  Favorite {
    /// Video id or link
    video: String,
  },
  /// List favorites
  Favorites,
  /// List watch history
  History {
    /// Clear watch history instead
    #[arg(long)]
    clear: bool,
  },
  /// List saved searches
  Searches {
    /// Clear search history instead
    #[arg(long)]
    clear: bool,
  },
  /// Show settings, or change them with flags
  Settings(SettingsArgs),
  /// Print shell completions
  Completions { shell: Shell },
}

#[derive(clap::Args, Debug)]
struct SettingsArgs {
  #[arg(long)]
  region: Option<String>,
  #[arg(long, value_enum)]
  view_mode: Option<ViewMode>,
  #[arg(long)]
  save_history: Option<bool>,
  #[arg(long, value_enum)]
  summary_length: Option<SummaryLength>,
  /// AI API key; an empty string clears it
  #[arg(long)]
  api_key: Option<String>,
  #[arg(long)]
  add_topic: Vec<String>,
  #[arg(long)]
  remove_topic: Vec<String>,
}

impl SettingsArgs {
  fn patch(&self) -> SettingsPatch {
    SettingsPatch {
      default_summary_length: self.summary_length,
      save_history: self.save_history,
      region: self.region.clone(),
      user_topics: None,
      view_mode: self.view_mode,
      api_key: self.api_key.clone(),
    }
  }
}

// --- Setup ---

/// Log to a file in the data dir so stdout carries only command output.
fn init_logging(data_dir: &Path) -> Result<WorkerGuard> {
  std::fs::create_dir_all(data_dir)
    .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
  let appender = tracing_appender::rolling::never(data_dir, &constants().log_file_name);
  let (writer, guard) = tracing_appender::non_blocking(appender);
  let filter = EnvFilter::try_from_env("YOUTOK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
    .try_init()
    .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
  Ok(guard)
}

fn drain_toasts(rx: &mut UnboundedReceiver<Toast>) {
  while let Ok(toast) = rx.try_recv() {
    eprintln!("{}", ui::render_toast(&toast));
  }
}

fn fetch_failed(what: &str, outcome: PageOutcome) {
  if outcome == PageOutcome::Failed {
    eprintln!("Could not load {} (see log for details).", what);
  }
}

/// Map a detail fetch failure to a user-facing error.
fn video_error(input: &str, err: FetchError) -> anyhow::Error {
  if err.is_unavailable() {
    anyhow::anyhow!("Video not found: {}", input)
  } else {
    anyhow::Error::new(err).context(format!("Failed to load video {}", input))
  }
}

// --- Output ---

fn print_videos(
  out: &mut impl Write,
  format: OutputFormat,
  app: &App,
  videos: &[Video],
  has_more: Option<bool>,
) -> Result<()> {
  let favorites = app.favorites();
  format.emit(out, videos, || {
    let list = ui::render_video_list(videos, |id| favorites.is_favorite(id), ui::terminal_width());
    match has_more {
      Some(more) if !videos.is_empty() => format!("{}{}", list, ui::render_more_hint(more)),
      _ => list,
    }
  })
}

// --- Commands ---

/// Fetch pages 2..=`pages` of the shown feed, stopping once it is exhausted.
async fn more_feed_pages(app: &mut App, pages: u32) {
  for _ in 1..pages {
    if app.load_more_feed().await.is_none() {
      break;
    }
  }
}

async fn run(app: &mut App, command: Command, format: OutputFormat, pages: u32) -> Result<()> {
  let mut out = io::stdout().lock();
  match command {
    Command::Feed => {
      fetch_failed("the feed", app.load_feed().await);
      more_feed_pages(app, pages).await;
      print_videos(&mut out, format, app, app.feed().videos(), Some(app.feed().has_more()))
    }
    Command::Trending { region } => {
      let region = region.unwrap_or_else(|| app.settings().region.clone());
      fetch_failed("trending videos", app.show_trending(&region).await);
      more_feed_pages(app, pages).await;
      print_videos(&mut out, format, app, app.feed().videos(), Some(app.feed().has_more()))
    }
    Command::Topic { topic } => {
      if let Some(outcome) = app.select_topic(&topic).await {
        fetch_failed("topic videos", outcome);
      }
      more_feed_pages(app, pages).await;
      print_videos(&mut out, format, app, app.feed().videos(), Some(app.feed().has_more()))
    }
    Command::Search { query } => {
      let query = query.join(" ");
      fetch_failed("search results", app.search(&query).await);
      for _ in 1..pages {
        if app.load_more_results().await.is_none() {
          break;
        }
      }
      let results = app.search_results();
      print_videos(&mut out, format, app, results.videos(), Some(results.has_more()))
    }
    Command::Open { video, length } => {
      let detail = app.open_video_by_id(&video).await.map_err(|e| video_error(&video, e))?;
      let length = length.unwrap_or(app.settings().default_summary_length);
      let favorite = app.favorites().is_favorite(&detail.video.id);
      format.emit(&mut out, &detail.video, || ui::render_detail(&detail, length, favorite, ui::terminal_width()))
    }
    Command::Favorite { video } => {
      let (card, now_favorite) = app.toggle_favorite_by_id(&video).await.map_err(|e| video_error(&video, e))?;
      let value = json!({"id": &card.id, "title": &card.title, "favorite": now_favorite});
      format.emit(&mut out, &value, || {
        let verb = if now_favorite { "Added to" } else { "Removed from" };
        format!("{} favorites: {} [{}]", verb, card.title, card.id)
      })
    }
    Command::Favorites => print_videos(&mut out, format, app, app.favorites().videos(), None),
    Command::History { clear: true } => {
      app.clear_history();
      Ok(())
    }
    Command::History { clear: false } => print_videos(&mut out, format, app, app.history().entries(), None),
    Command::Searches { clear: true } => {
      app.clear_search_history();
      Ok(())
    }
    Command::Searches { clear: false } => {
      let searches = app.history().searches();
      format.emit(&mut out, searches, || ui::render_searches(searches))
    }
    Command::Settings(args) => {
      let patch = args.patch();
      if !patch.is_empty() {
        app.update_settings(patch).await;
      }
      for topic in &args.add_topic {
        app.add_topic(topic).await;
      }
      for topic in &args.remove_topic {
        app.remove_topic(topic).await;
      }
      let settings = app.settings();
      format.emit(&mut out, &ui::redacted_settings(&settings), || ui::render_settings(&settings))
    }
    Command::Completions { shell } => {
      clap_complete::generate(shell, &mut Args::command(), "youtok", &mut out);
      Ok(())
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let config = Config::load();
  let data_dir = args.data_dir.clone().unwrap_or_else(|| config.data_dir());
  let _guard = init_logging(&data_dir)?;
  let storage = FileStorage::open(data_dir.clone())
    .with_context(|| format!("Failed to open storage in {}", data_dir.display()))?;
  info!(data_dir = %data_dir.display(), output = args.output.label(), "youtok: starting");

  let (toaster, mut toasts) = Toaster::channel();
  let mut app = App::new(&config, Arc::new(storage), toaster)?;
  let result = run(&mut app, args.command, args.output, args.pages).await;
  drain_toasts(&mut toasts);
  if let Err(ref e) = result {
    error!("youtok: {:#}", e);
  }
  result
}
