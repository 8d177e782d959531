//! Collaborators the composer and listing report to.

/// User-facing transient notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Navigation the core can request.
pub trait Navigator: Send + Sync {
    /// Go to the capsule listing, after a successful submission.
    fn open_listing(&self);

    /// Go to the generic error view, after a failed fetch.
    fn open_error(&self, reason: &str);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Ignores navigation requests; for headless use where the caller inspects
/// return values instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn open_listing(&self) {}

    fn open_error(&self, reason: &str) {
        tracing::debug!(reason, "error view requested");
    }
}
