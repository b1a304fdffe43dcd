//! Spinner shown while a reply is pending

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Shows "<name> is thinking..." between `AwaitingReply` and the settled reply
pub struct ReplyIndicator {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl ReplyIndicator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn start(&mut self, name: &str) {
        if !self.enabled || self.bar.is_some() {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(Self::spinner_style());
        bar.set_message(format!("{} is thinking...", name.bold()));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// Clear the spinner; no-op when none is showing.
    pub fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    pub fn is_active(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for ReplyIndicator {
    fn drop(&mut self) {
        self.stop();
    }
}
