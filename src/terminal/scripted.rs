//! In-memory terminal for headless sessions.

use super::Terminal;
use std::collections::VecDeque;
use std::io;

/// A terminal backed by queues instead of a tty.
///
/// Input is consumed from a byte queue; an empty queue behaves like a read
/// timeout. Every frame written is recorded. When a frame contains a cursor
/// position request (`ESC [ 6 n`) and a report is configured, the reply is
/// queued as input, the way a real terminal answers.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    input: VecDeque<u8>,
    frames: Vec<Vec<u8>>,
    size: Option<(u16, u16)>,
    cursor_report: Option<(u16, u16)>,
}

impl ScriptedTerminal {
    /// A terminal whose platform query reports `cols` x `rows`.
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            size: Some((cols, rows)),
            ..Self::default()
        }
    }

    /// A terminal whose platform size query fails.
    pub fn without_size() -> Self {
        Self::default()
    }

    /// Answer cursor position requests with `rows;cols`.
    #[must_use]
    pub const fn with_cursor_report(mut self, rows: u16, cols: u16) -> Self {
        self.cursor_report = Some((rows, cols));
        self
    }

    /// Queue input bytes.
    pub fn push_input(&mut self, bytes: &[u8]) {
        self.input.extend(bytes);
    }

    /// Bytes not consumed yet.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// All frames written so far.
    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// The most recent frame.
    pub fn last_frame(&self) -> Option<&[u8]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// The most recent frame, lossily decoded.
    pub fn last_frame_text(&self) -> String {
        self.last_frame()
            .map(|frame| String::from_utf8_lossy(frame).into_owned())
            .unwrap_or_default()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        if let Some((rows, cols)) = self.cursor_report {
            if bytes.windows(4).any(|w| w == b"\x1b[6n") {
                self.input.extend(format!("\x1b[{rows};{cols}R").bytes());
            }
        }
        self.frames.push(bytes.to_vec());
        Ok(())
    }

    fn platform_size(&mut self) -> io::Result<(u16, u16)> {
        self.size
            .ok_or_else(|| io::Error::new(io::ErrorKind::Unsupported, "no window size"))
    }
}
