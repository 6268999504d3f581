//! Frame composition.
//!
//! A frame is built into an [`OutputBuffer`] from top to bottom and written
//! with one call:
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ text rows (screen_rows)                │  highlighted, clipped to the view
//! │ ~                                      │  past end of file
//! ├────────────────────────────────────────┤
//! │ name - N lines (modified)     ft | y/N │  status bar, inverse video
//! ├────────────────────────────────────────┤
//! │ message                                │  transient
//! └────────────────────────────────────────┘
//! ```

use super::view::View;
use crate::buffer::{Document, Highlight, Row};
use crate::config::VERSION;
use crate::terminal::OutputBuffer;

/// Build a full frame for `doc` as seen through `view`.
///
/// `view` must already be scrolled so the cursor is on screen.
pub fn compose_frame(out: &mut OutputBuffer, doc: &Document, view: &View, message: Option<&str>) {
    out.clear();
    out.cursor_hide();
    out.cursor_home();

    draw_rows(out, doc, view);
    draw_status_bar(out, doc, view);
    draw_message_bar(out, view, message);

    let (x, y) = view.screen_cursor();
    out.cursor_move(x, y);
    out.cursor_show();
}

fn draw_rows(out: &mut OutputBuffer, doc: &Document, view: &View) {
    for y in 0..view.screen_rows {
        match doc.row(y + view.rowoff) {
            Some(row) => draw_row(out, row, view),
            None if doc.is_empty() && y == view.screen_rows / 3 => draw_welcome(out, view.screen_cols),
            None => out.write_byte(b'~'),
        }
        out.clear_line();
        out.newline();
    }
}

fn draw_welcome(out: &mut OutputBuffer, cols: usize) {
    let welcome = format!("Kilo Editor -- version {VERSION}");
    let len = welcome.len().min(cols);
    let mut padding = (cols - len) / 2;
    if padding > 0 {
        out.write_byte(b'~');
        padding -= 1;
    }
    for _ in 0..padding {
        out.write_byte(b' ');
    }
    out.write_raw(&welcome.as_bytes()[..len]);
}

/// Draw the visible slice of one row, switching colors only when the class
/// changes.
fn draw_row(out: &mut OutputBuffer, row: &Row, view: &View) {
    let render = row.render();
    let highlight = row.highlight();
    let start = view.coloff.min(render.len());
    let end = (start + view.screen_cols).min(render.len());

    let mut current: Option<u8> = None;
    for (&byte, &class) in render[start..end].iter().zip(&highlight[start..end]) {
        if byte.is_ascii_control() {
            let symbol = if byte <= 26 { b'@' + byte } else { b'?' };
            out.invert();
            out.write_byte(symbol);
            out.reset_attrs();
            if let Some(color) = current {
                out.set_fg(color);
            }
        } else if class == Highlight::Normal {
            if current.take().is_some() {
                out.default_fg();
            }
            out.write_byte(byte);
        } else {
            let color = class.color();
            if current != Some(color) {
                out.set_fg(color);
                current = Some(color);
            }
            out.write_byte(byte);
        }
    }
    out.default_fg();
}

/// Left and right halves of the status bar.
pub fn status_line(doc: &Document, view: &View) -> (String, String) {
    let name = doc
        .filename()
        .map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string());
    let modified = if doc.is_dirty() { " (modified)" } else { "" };
    let left = format!("{name:.20} - {} lines{modified}", doc.len());

    let filetype = doc.syntax().map_or("no ft", |s| s.name);
    let right = format!("{filetype} | {}/{}", view.cy + 1, doc.len());
    (left, right)
}

fn draw_status_bar(out: &mut OutputBuffer, doc: &Document, view: &View) {
    let (left, right) = status_line(doc, view);
    let cols = view.screen_cols;

    out.invert();
    let mut len = write_clipped(out, &left, cols);
    let right_len = right.chars().count();
    while len < cols {
        if cols - len == right_len {
            out.write_str(&right);
            break;
        }
        out.write_byte(b' ');
        len += 1;
    }
    out.reset_attrs();
    out.newline();
}

fn draw_message_bar(out: &mut OutputBuffer, view: &View, message: Option<&str>) {
    out.clear_line();
    if let Some(message) = message {
        write_clipped(out, message, view.screen_cols);
    }
}

/// Write at most `max` characters of `text`, returning how many were written.
fn write_clipped(out: &mut OutputBuffer, text: &str, max: usize) -> usize {
    match text.char_indices().nth(max) {
        Some((cut, _)) => {
            out.write_str(&text[..cut]);
            max
        }
        None => {
            out.write_str(text);
            text.chars().count()
        }
    }
}
