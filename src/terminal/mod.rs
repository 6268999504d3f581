//! Terminal driver: raw mode, input decoding, geometry and output.
//!
//! The editor never talks to stdin/stdout directly. Everything goes through
//! the [`Terminal`] trait so that a session can run against [`Tty`] (the real
//! terminal) or [`ScriptedTerminal`] (an in-memory stand-in).
//!
//! ```text
//! ┌───────────┐  read_byte   ┌──────────┐  Key   ┌────────┐
//! │ Terminal  │ ───────────▶ │ read_key │ ─────▶ │ Editor │
//! │           │              └──────────┘        │        │
//! │           │  write_frame ┌──────────────┐    │        │
//! │           │ ◀─────────── │ OutputBuffer │ ◀─ │        │
//! └───────────┘              └──────────────┘    └────────┘
//! ```

mod keys;
mod output;
mod raw;
mod scripted;
mod size;
mod tty;

pub use keys::{ctrl, read_key, Key, BACKSPACE, ENTER, ESC};
pub use output::OutputBuffer;
pub use raw::RawMode;
pub use scripted::ScriptedTerminal;
pub use size::{parse_cursor_report, window_size};
pub use tty::Tty;

use std::io;

/// Byte-level access to a terminal.
pub trait Terminal {
    /// Read a single input byte.
    ///
    /// Returns `Ok(None)` when the read timed out with nothing available.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Write a complete frame with a single write.
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Window size as reported by the platform, `(columns, rows)`.
    fn platform_size(&mut self) -> io::Result<(u16, u16)>;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        (**self).read_byte()
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_frame(bytes)
    }

    fn platform_size(&mut self) -> io::Result<(u16, u16)> {
        (**self).platform_size()
    }
}
