//! Error types shared across the editor.
//!
//! Only environment failures are errors. Out-of-range edits are no-ops and
//! file problems while editing are reported through the message bar, so
//! neither shows up here.

use std::io;
use thiserror::Error;

/// Fatal editor errors.
///
/// Any of these ends the session: the raw-mode guard restores the terminal
/// while the error propagates to `main`.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing terminal attributes failed.
    #[error("{op}: {source}")]
    Terminal {
        /// The failing call (`tcgetattr`, `tcsetattr`).
        op: &'static str,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Neither the platform query nor the cursor report produced a size.
    #[error("get_window_size: unable to determine terminal size")]
    WindowSize,

    /// Reading input failed with something other than a timeout.
    #[error("read: {0}")]
    Read(#[source] io::Error),

    /// Writing a frame failed.
    #[error("write: {0}")]
    Write(#[source] io::Error),
}

/// Result alias for fallible editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
