//! The process's own terminal.

use super::Terminal;
use std::io::{self, Read};
use std::os::unix::io::{AsRawFd, RawFd};

/// Terminal on stdin/stdout.
#[derive(Debug, Default)]
pub struct Tty {
    _private: (),
}

impl Tty {
    /// Handle to the controlling terminal.
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Descriptor whose attributes control input processing.
    pub fn input_fd(&self) -> RawFd {
        io::stdin().as_raw_fd()
    }
}

impl Terminal for Tty {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            Ok(1) => Ok(Some(byte[0])),
            Ok(_) => Ok(None),
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Writes straight to the descriptor: `Stdout` is line buffered and
    /// would split a frame at its last newline.
    #[allow(unsafe_code)]
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        let fd = io::stdout().as_raw_fd();
        let mut written = 0;
        while written < bytes.len() {
            let rest = &bytes[written..];
            // SAFETY: `rest` is a live slice; write reads at most `rest.len()` bytes from it.
            let n = unsafe { libc::write(fd, rest.as_ptr().cast(), rest.len()) };
            if n < 0 {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    continue;
                }
                return Err(err);
            }
            if n == 0 {
                return Err(io::ErrorKind::WriteZero.into());
            }
            written += n.unsigned_abs();
        }
        Ok(())
    }

    fn platform_size(&mut self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }
}
