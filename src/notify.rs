//! Terminal notifications.

use articlesync_core::{Notifier, Variant};

/// Prints notifications to stderr and mirrors them into the log.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl TerminalNotifier {
    fn render(message: &str, variant: Variant) -> String {
        let marker = match variant {
            Variant::Info => "•",
            Variant::Success => "✓",
            Variant::Warning => "!",
            Variant::Error => "✗",
        };
        format!("{} {}", marker, message)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, variant: Variant) {
        match variant {
            Variant::Error => tracing::error!(notification = %variant, "{}", message),
            Variant::Warning => tracing::warn!(notification = %variant, "{}", message),
            Variant::Info | Variant::Success => {
                tracing::info!(notification = %variant, "{}", message)
            }
        }
        eprintln!("{}", Self::render(message, variant));
    }
}
