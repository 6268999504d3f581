//! Key decoding.
//!
//! Raw input is a byte stream. Plain bytes map to [`Key::Char`]; an escape
//! byte starts a short lookahead that recognises the handful of VT100/xterm
//! sequences the editor binds:
//!
//! | Sequence               | Key                 |
//! |------------------------|---------------------|
//! | `ESC [ A/B/C/D`        | Up/Down/Right/Left  |
//! | `ESC [ H`, `ESC O H`   | Home                |
//! | `ESC [ F`, `ESC O F`   | End                 |
//! | `ESC [ 1~`, `ESC [ 7~` | Home                |
//! | `ESC [ 4~`, `ESC [ 8~` | End                 |
//! | `ESC [ 3~`             | Delete              |
//! | `ESC [ 5~`, `ESC [ 6~` | PageUp, PageDown    |
//!
//! Anything else, including a sequence cut short by the read timeout,
//! decodes as a bare [`Key::Escape`].

use super::Terminal;
use crate::error::{EditorError, Result};

/// The escape byte.
pub const ESC: u8 = 0x1b;
/// What the terminal sends for the Backspace key in raw mode.
pub const BACKSPACE: u8 = 127;
/// What the terminal sends for Enter once `ICRNL` is off.
pub const ENTER: u8 = b'\r';

/// The byte produced by Ctrl plus `key`.
///
/// Ctrl clears bits 5 and 6 of the pressed key.
#[inline]
pub const fn ctrl(key: u8) -> u8 {
    key & 0x1f
}

/// A decoded key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A single byte, printable or control.
    Char(u8),
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Delete (forward delete).
    Delete,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// A lone escape, or an unrecognised escape sequence.
    Escape,
}

impl Key {
    /// Ctrl plus `key`, as a [`Key::Char`].
    pub const fn ctrl(key: u8) -> Self {
        Self::Char(ctrl(key))
    }
}

/// Read and decode one key.
///
/// Returns `Ok(None)` if the read timed out before any byte arrived.
pub fn read_key<T: Terminal + ?Sized>(terminal: &mut T) -> Result<Option<Key>> {
    let Some(byte) = next_byte(terminal)? else {
        return Ok(None);
    };
    if byte != ESC {
        return Ok(Some(Key::Char(byte)));
    }
    decode_escape(terminal).map(Some)
}

fn next_byte<T: Terminal + ?Sized>(terminal: &mut T) -> Result<Option<u8>> {
    terminal.read_byte().map_err(EditorError::Read)
}

/// Decode the bytes following an `ESC`.
fn decode_escape<T: Terminal + ?Sized>(terminal: &mut T) -> Result<Key> {
    let Some(first) = next_byte(terminal)? else {
        return Ok(Key::Escape);
    };
    let Some(second) = next_byte(terminal)? else {
        return Ok(Key::Escape);
    };

    let key = match (first, second) {
        (b'[', digit @ b'0'..=b'9') => match next_byte(terminal)? {
            Some(b'~') => tilde_key(digit),
            _ => None,
        },
        (b'[', b'A') => Some(Key::Up),
        (b'[', b'B') => Some(Key::Down),
        (b'[', b'C') => Some(Key::Right),
        (b'[', b'D') => Some(Key::Left),
        (b'[' | b'O', b'H') => Some(Key::Home),
        (b'[' | b'O', b'F') => Some(Key::End),
        _ => None,
    };

    Ok(key.unwrap_or(Key::Escape))
}

/// Keys of the form `ESC [ <digit> ~`.
const fn tilde_key(digit: u8) -> Option<Key> {
    match digit {
        b'1' | b'7' => Some(Key::Home),
        b'3' => Some(Key::Delete),
        b'4' | b'8' => Some(Key::End),
        b'5' => Some(Key::PageUp),
        b'6' => Some(Key::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;

    fn decode(input: &[u8]) -> Vec<Key> {
        let mut term = ScriptedTerminal::new(80, 24);
        term.push_input(input);
        let mut keys = Vec::new();
        while let Some(key) = read_key(&mut term).unwrap() {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn test_plain_bytes() {
        assert_eq!(decode(b"ab\r"), vec![Key::Char(b'a'), Key::Char(b'b'), Key::Char(ENTER)]);
        assert_eq!(decode(&[ctrl(b'q')]), vec![Key::ctrl(b'q')]);
        assert_eq!(Key::ctrl(b'q'), Key::Char(0x11));
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            decode(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::Up, Key::Down, Key::Right, Key::Left]
        );
    }

    #[test]
    fn test_home_end_variants() {
        assert_eq!(
            decode(b"\x1b[H\x1bOH\x1b[1~\x1b[7~"),
            vec![Key::Home, Key::Home, Key::Home, Key::Home]
        );
        assert_eq!(
            decode(b"\x1b[F\x1bOF\x1b[4~\x1b[8~"),
            vec![Key::End, Key::End, Key::End, Key::End]
        );
    }

    #[test]
    fn test_tilde_keys() {
        assert_eq!(
            decode(b"\x1b[3~\x1b[5~\x1b[6~"),
            vec![Key::Delete, Key::PageUp, Key::PageDown]
        );
    }

    #[test]
    fn test_unknown_sequences_are_escape() {
        // Unknown final byte.
        assert_eq!(decode(b"\x1b[Z"), vec![Key::Escape]);
        // Digit without the closing tilde consumes three bytes.
        assert_eq!(decode(b"\x1b[2~"), vec![Key::Escape]);
        assert_eq!(decode(b"\x1b[5xq"), vec![Key::Escape, Key::Char(b'q')]);
        // ESC O with something other than H/F.
        assert_eq!(decode(b"\x1bOP"), vec![Key::Escape]);
    }

    #[test]
    fn test_truncated_sequence_is_escape() {
        assert_eq!(decode(b"\x1b"), vec![Key::Escape]);
        assert_eq!(decode(b"\x1b["), vec![Key::Escape]);
        assert_eq!(decode(b"\x1b[3"), vec![Key::Escape]);
    }

    #[test]
    fn test_timeout_yields_none() {
        let mut term = ScriptedTerminal::new(80, 24);
        assert_eq!(read_key(&mut term).unwrap(), None);
    }
}
