use futflare_runtime::{Navigator, Notifier};
use owo_colors::OwoColorize;

use crate::types::OutputFormat;

/// Prints success notices to stderr. Failures are reported once, by the
/// command's own error, so they only go to the log here.
pub struct ConsoleNotifier {
    format: OutputFormat,
    color: bool,
}

impl ConsoleNotifier {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self { format, color }
    }
}

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            eprintln!("{} {}", "✓".green().bold(), message);
        } else {
            eprintln!("✓ {}", message);
        }
    }

    fn error(&self, message: &str) {
        tracing::debug!(message, "error notification");
    }
}

/// A one-shot process has no views to switch to; navigation requests become
/// hints on stderr.
pub struct ConsoleNavigator {
    format: OutputFormat,
}

impl ConsoleNavigator {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Navigator for ConsoleNavigator {
    fn open_listing(&self) {
        if self.format == OutputFormat::Plain {
            eprintln!("Run `futflare capsule list` to see your capsules.");
        }
    }

    fn open_error(&self, reason: &str) {
        tracing::debug!(reason, "error view requested");
    }
}
