//! Transient message bar text.

use std::time::{Duration, Instant};

/// A message shown under the status bar until it expires.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Instant,
}

impl StatusMessage {
    /// A message stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            set_at: Instant::now(),
        }
    }

    /// The full text, expired or not.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The text if it is younger than `timeout` and not empty.
    pub fn visible(&self, timeout: Duration) -> Option<&str> {
        (!self.text.is_empty() && self.set_at.elapsed() < timeout).then_some(self.text.as_str())
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::new(String::new())
    }
}
