//! Editor configuration.

use std::time::Duration;
use tracing::warn;

/// Editor version shown in the welcome banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the [`Editor`](crate::Editor).
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Tab stop used when expanding tabs for display.
    pub tab_stop: usize,
    /// Extra Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_times: usize,
    /// How long a status message stays visible.
    pub message_timeout: Duration,
    /// Upper bound on a single terminal read before the screen is redrawn.
    pub input_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_stop: 8,
            quit_times: 3,
            message_timeout: Duration::from_secs(5),
            input_timeout: Duration::from_millis(100),
        }
    }
}

impl EditorConfig {
    /// Defaults, overridden by `KILO_TAB_STOP` and `KILO_QUIT_TIMES`.
    ///
    /// Unparseable or zero tab stops are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(tab_stop) = env_usize("KILO_TAB_STOP") {
            if tab_stop == 0 {
                warn!("KILO_TAB_STOP must be positive, keeping {}", config.tab_stop);
            } else {
                config.tab_stop = tab_stop;
            }
        }
        if let Some(quit_times) = env_usize("KILO_QUIT_TIMES") {
            config.quit_times = quit_times;
        }
        config
    }

    /// `VTIME` value for the input timeout, in tenths of a second (at least 1).
    pub fn input_timeout_deciseconds(&self) -> u8 {
        let tenths = self.input_timeout.as_millis() / 100;
        u8::try_from(tenths).unwrap_or(u8::MAX).max(1)
    }
}

fn env_usize(name: &str) -> Option<usize> {
    let value = std::env::var(name).ok()?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("ignoring {name}={value:?}: {e}");
            None
        }
    }
}
