//! # Kilo
//!
//! A small terminal text editor in the spirit of antirez's kilo.
//!
//! The editor runs the terminal in raw mode and redraws the whole screen
//! every iteration of its key loop. Each frame is composed in memory and
//! written with a single call, so the terminal never shows a half-drawn
//! screen.
//!
//! ## Core Concepts
//!
//! - **Rows**: each line keeps its raw bytes, a tab-expanded render and one
//!   highlight class per render byte
//! - **Syntax**: a per-row state machine for comments, strings, numbers and
//!   keywords, selected from the file name
//! - **View**: cursor in raw columns, scrolling in render columns
//! - **Incremental search**: the match is painted over the row and the row's
//!   previous highlight is restored on the next keystroke
//!
//! ## Example
//!
//! ```rust,no_run
//! use kilo::{Editor, EditorConfig, RawMode, Tty};
//!
//! # fn main() -> kilo::Result<()> {
//! let config = EditorConfig::default();
//! let tty = Tty::new();
//! let _raw = RawMode::enable(tty.input_fd(), config.input_timeout_deciseconds())?;
//!
//! let mut editor = Editor::new(tty, config)?;
//! editor.open(std::path::Path::new("main.c"));
//! editor.run()
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod buffer;
pub mod config;
pub mod editor;
pub mod error;
pub mod terminal;

// Re-exports for convenience
pub use buffer::{Document, Highlight, Row, Syntax, SyntaxFlags, HLDB};
pub use config::EditorConfig;
pub use editor::{Editor, Search, View};
pub use error::{EditorError, Result};
pub use terminal::{Key, OutputBuffer, RawMode, ScriptedTerminal, Terminal, Tty};
