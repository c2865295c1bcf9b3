//! Video feed client: trending, topic and search feeds over a Piped-compatible
//! index, with locally persisted settings, history and favorites, and detail
//! views that can carry an AI-generated transcript summary.

pub mod app;
pub mod config;
pub mod constants;
pub mod detail;
pub mod display;
pub mod favorites;
pub mod feed;
pub mod history;
pub mod input;
pub mod notify;
pub mod settings;
pub mod storage;
pub mod summary;
pub mod transcript;
pub mod ui;
pub mod video;
pub mod youtube;

pub use app::App;
