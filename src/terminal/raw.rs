//! Raw mode: a scoped termios change.

use crate::error::{EditorError, Result};
use std::io;
use std::os::unix::io::RawFd;
use tracing::{debug, warn};

/// Guard holding the terminal in raw mode.
///
/// The attributes captured by [`RawMode::enable`] are put back when the guard
/// is dropped, so every exit path (quit, `?` on a fatal error, unwinding)
/// leaves the terminal in cooked mode.
pub struct RawMode {
    fd: RawFd,
    original: libc::termios,
    active: bool,
}

impl RawMode {
    /// Switch `fd` to raw mode with a read timeout of `timeout_deciseconds`.
    ///
    /// Input: no break signal, no CR to NL translation, no parity check, no
    /// eighth-bit strip, no XON/XOFF. Output: no post-processing. Local: no
    /// echo, no canonical mode, no `IEXTEN`, no signal keys. Reads return
    /// after one byte or the timeout, whichever comes first.
    pub fn enable(fd: RawFd, timeout_deciseconds: u8) -> Result<Self> {
        let original = get_attrs(fd)?;

        let mut raw = original;
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        raw.c_oflag &= !libc::OPOST;
        raw.c_cflag |= libc::CS8;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = timeout_deciseconds.max(1);

        set_attrs(fd, &raw)?;
        debug!(fd, timeout_deciseconds, "raw mode enabled");

        Ok(Self {
            fd,
            original,
            active: true,
        })
    }

    /// Restore the captured attributes now, reporting failure.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        set_attrs(self.fd, &self.original)
    }
}

impl std::fmt::Debug for RawMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawMode")
            .field("fd", &self.fd)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = set_attrs(self.fd, &self.original) {
                warn!("failed to restore terminal: {e}");
            }
        }
    }
}

#[allow(unsafe_code)]
fn get_attrs(fd: RawFd) -> Result<libc::termios> {
    // SAFETY: termios is plain old data; tcgetattr fills it in completely on success.
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut termios) } != 0 {
        return Err(EditorError::Terminal {
            op: "tcgetattr",
            source: io::Error::last_os_error(),
        });
    }
    Ok(termios)
}

#[allow(unsafe_code)]
fn set_attrs(fd: RawFd, termios: &libc::termios) -> Result<()> {
    // SAFETY: `termios` is a valid, initialised struct borrowed for the call.
    if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) } != 0 {
        return Err(EditorError::Terminal {
            op: "tcsetattr",
            source: io::Error::last_os_error(),
        });
    }
    Ok(())
}
