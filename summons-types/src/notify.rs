//! User-visible notifications.

use tracing::{error, info, warn};

/// The host's notification service (toast messages in the UI).
pub trait Notifier: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that forwards everything to `tracing`.
/// Used when no UI is attached (the CLI, headless tools).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn info(&self, message: &str) {
        info!(target: "summons::notify", "{message}");
    }

    fn warn(&self, message: &str) {
        warn!(target: "summons::notify", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "summons::notify", "{message}");
    }
}
