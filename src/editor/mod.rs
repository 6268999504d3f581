//! Editor module: the interactive session on top of the buffer and terminal.
//!
//! This module contains:
//! - [`Editor`]: Owns the terminal, document and view and runs the key loop
//! - [`View`]: Cursor position and scroll offsets
//! - [`Search`]: Incremental search state
//! - [`compose_frame`]: Turns a document and view into one frame of output

#[allow(clippy::module_inception)]
mod editor;
mod render;
mod search;
mod status;
mod view;

pub use editor::Editor;
pub use render::{compose_frame, status_line};
pub use search::{Direction, Search};
pub use status::StatusMessage;
pub use view::{SavedView, View};
