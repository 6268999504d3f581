//! Buffer module: the text being edited.
//!
//! This module contains:
//! - [`Row`]: one line with its tab-expanded render and highlight classes
//! - [`Document`]: the ordered rows plus file and language state
//! - [`Syntax`]: language profiles and the row highlighter
//! - [`Highlight`]: the per-byte classification drawn on screen

mod document;
mod highlight;
mod row;
pub mod syntax;

pub use document::{split_lines, Document};
pub use highlight::Highlight;
pub use row::{Row, RowFormat};
pub use syntax::{Syntax, SyntaxFlags, HLDB};
