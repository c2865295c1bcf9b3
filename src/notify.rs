use tokio::sync::mpsc;
use tracing::info;

/// A transient user-facing message describing a mutation that just happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub title: String,
  pub description: String,
}

/// Sends toasts to whoever renders them.
///
/// Every toast is logged; when a receiver is attached it also gets a copy.
/// Cloning shares the same channel.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
  tx: Option<mpsc::UnboundedSender<Toast>>,
}

impl Toaster {
  /// A toaster that only logs.
  pub fn silent() -> Self {
    Self::default()
  }

  pub fn channel() -> (Self, mpsc::UnboundedReceiver<Toast>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Self { tx: Some(tx) }, rx)
  }

  pub fn toast(&self, title: impl Into<String>, description: impl Into<String>) {
    let toast = Toast { title: title.into(), description: description.into() };
    info!(title = %toast.title, description = %toast.description, "toast");
    if let Some(ref tx) = self.tx {
      let _ = tx.send(toast);
    }
  }
}
