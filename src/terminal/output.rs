//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use super::Terminal;
use std::io::{self, Write};

/// Pre-allocated buffer for building one frame of ANSI escape sequences.
///
/// All output is accumulated here, then flushed in a single `write()` syscall
/// to prevent terminal flickering.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical terminal (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write raw bytes.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.data.push(byte);
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: usize, y: usize) {
        write!(self.data, "\x1b[{};{}H", y + 1, x + 1).unwrap();
    }

    /// Move cursor to the top-left corner.
    #[inline]
    pub fn cursor_home(&mut self) {
        self.data.extend_from_slice(b"\x1b[H");
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set foreground color from an SGR color code (30-37, 39 for default).
    #[inline]
    pub fn set_fg(&mut self, code: u8) {
        write!(self.data, "\x1b[{code}m").unwrap();
    }

    /// Restore the default foreground color.
    #[inline]
    pub fn default_fg(&mut self) {
        self.data.extend_from_slice(b"\x1b[39m");
    }

    /// Swap foreground and background.
    #[inline]
    pub fn invert(&mut self) {
        self.data.extend_from_slice(b"\x1b[7m");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[m");
    }

    /// Erase from the cursor to the end of the line.
    #[inline]
    pub fn clear_line(&mut self) {
        self.data.extend_from_slice(b"\x1b[K");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Carriage return plus line feed; output post-processing is off in raw mode.
    #[inline]
    pub fn newline(&mut self) {
        self.data.extend_from_slice(b"\r\n");
    }

    /// Flush to a terminal in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal write fails.
    pub fn flush_to<T: Terminal + ?Sized>(&self, terminal: &mut T) -> io::Result<()> {
        terminal.write_frame(&self.data)
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
