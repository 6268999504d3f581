//! Row: one line of text plus its derived display form.
//!
//! # Representation
//!
//! ```text
//!  chars      b"\tx = 1;"            raw bytes, as stored on disk
//!  render     b"        x = 1;"      tabs expanded to the tab stop
//!  highlight  [N N N N N N N N N ..] one class per render byte
//! ```
//!
//! `render` and `highlight` are derived from `chars` and are rebuilt by every
//! mutating method, so they are never stale when the row is drawn or searched.

use super::syntax::{highlight_row, Syntax};
use super::Highlight;

/// Everything needed to derive a row's display form.
#[derive(Debug, Clone, Copy)]
pub struct RowFormat {
    /// Tab stop width, at least 1.
    pub tab_stop: usize,
    /// Active language profile.
    pub syntax: Option<&'static Syntax>,
}

impl RowFormat {
    /// Plain text with the given tab stop.
    pub const fn plain(tab_stop: usize) -> Self {
        Self {
            tab_stop,
            syntax: None,
        }
    }
}

/// A single line of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    chars: Vec<u8>,
    render: Vec<u8>,
    highlight: Vec<Highlight>,
}

impl Row {
    /// Build a row and derive its render and highlight.
    pub fn new(chars: impl Into<Vec<u8>>, format: RowFormat) -> Self {
        let mut row = Self {
            chars: chars.into(),
            render: Vec::new(),
            highlight: Vec::new(),
        };
        row.update(format);
        row
    }

    /// Raw bytes of the line.
    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    /// Tab-expanded bytes.
    #[inline]
    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// One highlight class per render byte.
    #[inline]
    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Length of the raw line.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether the raw line is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length of the rendered line.
    #[inline]
    pub fn rsize(&self) -> usize {
        self.render.len()
    }

    /// Rebuild `render` from `chars`, then re-highlight.
    pub fn update(&mut self, format: RowFormat) {
        let tab_stop = format.tab_stop.max(1);
        self.render.clear();
        for &byte in &self.chars {
            if byte == b'\t' {
                self.render.push(b' ');
                while self.render.len() % tab_stop != 0 {
                    self.render.push(b' ');
                }
            } else {
                self.render.push(byte);
            }
        }
        self.update_syntax(format.syntax);
    }

    /// Recompute the highlight array from the current render text.
    pub fn update_syntax(&mut self, syntax: Option<&Syntax>) {
        highlight_row(&self.render, syntax, &mut self.highlight);
    }

    /// Render column of raw column `cx`.
    pub fn cx_to_rx(&self, cx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        self.chars.iter().take(cx).fold(0, |rx, &byte| {
            if byte == b'\t' {
                rx + tab_stop - (rx % tab_stop)
            } else {
                rx + 1
            }
        })
    }

    /// Raw column containing render column `rx`.
    ///
    /// Returns the first `cx` whose cumulative render width exceeds `rx`, or
    /// the row length when `rx` is past the end.
    pub fn rx_to_cx(&self, rx: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let mut cur_rx = 0;
        for (cx, &byte) in self.chars.iter().enumerate() {
            if byte == b'\t' {
                cur_rx += tab_stop - (cur_rx % tab_stop);
            } else {
                cur_rx += 1;
            }
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    /// Insert `byte` at `at`; positions past the end append.
    pub fn insert_char(&mut self, at: usize, byte: u8, format: RowFormat) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, byte);
        self.update(format);
    }

    /// Remove the byte at `at`. Returns `false` (and changes nothing) if `at`
    /// is not inside the row.
    pub fn delete_char(&mut self, at: usize, format: RowFormat) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        self.update(format);
        true
    }

    /// Append raw bytes to the end of the row.
    pub fn append(&mut self, bytes: &[u8], format: RowFormat) {
        self.chars.extend_from_slice(bytes);
        self.update(format);
    }

    /// Cut the row at `at`, returning the removed tail.
    pub fn split_off(&mut self, at: usize, format: RowFormat) -> Vec<u8> {
        let at = at.min(self.chars.len());
        let tail = self.chars.split_off(at);
        self.update(format);
        tail
    }

    /// Paint `range` of the highlight array as a search hit.
    pub(crate) fn overlay_match(&mut self, start: usize, len: usize) {
        let end = (start + len).min(self.highlight.len());
        if start < end {
            self.highlight[start..end].fill(Highlight::Match);
        }
    }

    /// Put back a highlight array saved before an overlay.
    ///
    /// Ignored if the row has been re-derived to a different length since.
    pub(crate) fn restore_highlight(&mut self, saved: Vec<Highlight>) {
        if saved.len() == self.highlight.len() {
            self.highlight = saved;
        }
    }
}
