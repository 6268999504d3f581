//! Window geometry.

use super::Terminal;
use crate::error::{EditorError, Result};
use tracing::debug;

/// Longest cursor position report accepted.
const REPORT_MAX: usize = 32;

/// Query the terminal size as `(columns, rows)`.
///
/// Uses the platform query first. If that fails or reports zero columns,
/// the cursor is pushed to the bottom-right corner and its position is
/// requested with a device status report.
pub fn window_size<T: Terminal + ?Sized>(terminal: &mut T) -> Result<(u16, u16)> {
    match terminal.platform_size() {
        Ok((cols, rows)) if cols > 0 => return Ok((cols, rows)),
        Ok(_) => debug!("platform reported zero columns, asking the terminal"),
        Err(e) => debug!("platform size query failed ({e}), asking the terminal"),
    }

    // `C` and `B` stop at the screen edge, unlike an absolute `H` move.
    terminal
        .write_frame(b"\x1b[999C\x1b[999B")
        .map_err(EditorError::Write)?;
    let (rows, cols) = cursor_position(terminal)?;
    Ok((cols, rows))
}

/// Ask for the cursor position, returning `(row, col)`.
fn cursor_position<T: Terminal + ?Sized>(terminal: &mut T) -> Result<(u16, u16)> {
    terminal.write_frame(b"\x1b[6n").map_err(EditorError::Write)?;

    let mut reply = Vec::with_capacity(REPORT_MAX);
    while reply.len() < REPORT_MAX - 1 {
        match terminal.read_byte().map_err(EditorError::Read)? {
            Some(b'R') | None => break,
            Some(byte) => reply.push(byte),
        }
    }

    parse_cursor_report(&reply).ok_or(EditorError::WindowSize)
}

/// Parse a cursor position report `ESC [ row ; col`, terminator stripped.
///
/// A trailing `R` is tolerated.
pub fn parse_cursor_report(reply: &[u8]) -> Option<(u16, u16)> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let body = body.strip_suffix(b"R").unwrap_or(body);
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    Some((rows.parse().ok()?, cols.parse().ok()?))
}
