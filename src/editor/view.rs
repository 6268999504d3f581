//! Viewport and cursor.
//!
//! The cursor lives in raw coordinates (`cx`, `cy`). `cy` may equal the row
//! count, which is the empty line past the end of the file where appending
//! starts. The render column `rx` and the scroll offsets are derived from the
//! cursor on every refresh.

use crate::buffer::Document;
use crate::terminal::Key;

/// Cursor position and the visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    /// Cursor column in raw bytes.
    pub cx: usize,
    /// Cursor row.
    pub cy: usize,
    /// Cursor column in render bytes, set by [`View::scroll`].
    pub rx: usize,
    /// First visible row.
    pub rowoff: usize,
    /// First visible render column.
    pub coloff: usize,
    /// Text rows on screen.
    pub screen_rows: usize,
    /// Columns on screen.
    pub screen_cols: usize,
}

impl View {
    /// A view at the top of the document.
    pub const fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            cx: 0,
            cy: 0,
            rx: 0,
            rowoff: 0,
            coloff: 0,
            screen_rows,
            screen_cols,
        }
    }

    /// Recompute `rx` and adjust the offsets so the cursor is visible.
    pub fn scroll(&mut self, doc: &Document) {
        self.rx = doc
            .row(self.cy)
            .map_or(0, |row| row.cx_to_rx(self.cx, doc.tab_stop()));

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + self.screen_rows {
            self.rowoff = (self.cy + 1).saturating_sub(self.screen_rows);
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screen_cols {
            self.coloff = (self.rx + 1).saturating_sub(self.screen_cols);
        }
    }

    /// Move one step for an arrow key. Other keys are ignored.
    pub fn move_cursor(&mut self, doc: &Document, key: Key) {
        let row_len = doc.row(self.cy).map(|row| row.len());

        match key {
            Key::Left => {
                if self.cx > 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = doc.row_len(self.cy);
                }
            }
            Key::Right => match row_len {
                Some(len) if self.cx < len => self.cx += 1,
                Some(_) if self.cy + 1 < doc.len() => {
                    self.cy += 1;
                    self.cx = 0;
                }
                _ => {}
            },
            Key::Up => self.cy = self.cy.saturating_sub(1),
            Key::Down => {
                if self.cy < doc.len() {
                    self.cy += 1;
                }
            }
            _ => {}
        }

        self.clamp_cx(doc);
    }

    /// Page up or down by a screenful.
    ///
    /// The cursor first jumps to the top or bottom edge of the viewport, then
    /// moves a screen height line by line with the arrow-key rules.
    pub fn page(&mut self, doc: &Document, key: Key) {
        let step = match key {
            Key::PageUp => {
                self.cy = self.rowoff;
                Key::Up
            }
            Key::PageDown => {
                self.cy = (self.rowoff + self.screen_rows)
                    .saturating_sub(1)
                    .min(doc.len());
                Key::Down
            }
            _ => return,
        };
        self.clamp_cx(doc);
        for _ in 0..self.screen_rows {
            self.move_cursor(doc, step);
        }
    }

    /// Start of the line.
    pub fn home(&mut self) {
        self.cx = 0;
    }

    /// End of the line.
    pub fn end(&mut self, doc: &Document) {
        self.cx = doc.row_len(self.cy);
    }

    /// Keep `cx` inside the current row.
    pub fn clamp_cx(&mut self, doc: &Document) {
        self.cx = self.cx.min(doc.row_len(self.cy));
    }

    /// Cursor position relative to the top-left of the screen, `(x, y)`.
    pub const fn screen_cursor(&self) -> (usize, usize) {
        (
            self.rx.saturating_sub(self.coloff),
            self.cy.saturating_sub(self.rowoff),
        )
    }

    /// Cursor, row offset and column offset, for restoring after a search.
    pub const fn save(&self) -> SavedView {
        SavedView {
            cx: self.cx,
            cy: self.cy,
            rowoff: self.rowoff,
            coloff: self.coloff,
        }
    }

    /// Put back a position captured with [`View::save`].
    pub fn restore(&mut self, saved: SavedView) {
        self.cx = saved.cx;
        self.cy = saved.cy;
        self.rowoff = saved.rowoff;
        self.coloff = saved.coloff;
    }
}

/// Position captured before a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedView {
    cx: usize,
    cy: usize,
    rowoff: usize,
    coloff: usize,
}
