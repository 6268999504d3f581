//! Editor: the owned context tying terminal, document and view together.
//!
//! One loop iteration is: scroll the view, compose and write a frame, read
//! one key (or time out), handle it. Everything runs on the calling thread
//! and all state lives in [`Editor`].

use super::render::compose_frame;
use super::search::Search;
use super::status::StatusMessage;
use super::view::View;
use crate::buffer::Document;
use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::terminal::{ctrl, read_key, window_size, Key, OutputBuffer, Terminal, BACKSPACE, ENTER};
use std::path::Path;
use tracing::{debug, info, warn};

/// Rows taken by the status bar and the message bar.
const BAR_ROWS: usize = 2;

/// The editor session.
pub struct Editor<T: Terminal> {
    terminal: T,
    config: EditorConfig,
    doc: Document,
    view: View,
    status: StatusMessage,
    /// Ctrl-Q presses still needed to quit with unsaved changes.
    quit_times: usize,
    output: OutputBuffer,
    running: bool,
}

impl<T: Terminal> Editor<T> {
    /// Create an editor with an empty document, sized to the terminal.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::WindowSize`] if the size cannot be determined.
    pub fn new(mut terminal: T, config: EditorConfig) -> Result<Self> {
        let (cols, rows) = window_size(&mut terminal)?;
        debug!(cols, rows, "window size");

        let screen_rows = usize::from(rows).saturating_sub(BAR_ROWS).max(1);
        let screen_cols = usize::from(cols).max(1);

        Ok(Self {
            terminal,
            doc: Document::new(config.tab_stop),
            view: View::new(screen_rows, screen_cols),
            status: StatusMessage::default(),
            quit_times: config.quit_times,
            output: OutputBuffer::with_capacity(screen_rows * screen_cols * 2),
            config,
            running: true,
        })
    }

    /// Load `path`. Failure is reported on the message bar.
    pub fn open(&mut self, path: &Path) {
        self.view = View::new(self.view.screen_rows, self.view.screen_cols);
        if let Err(e) = self.doc.open(path) {
            warn!(path = %path.display(), "open failed: {e}");
            self.set_status(format!("Can't open {}: {e}", path.display()));
        }
    }

    /// Show a message on the message bar.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = StatusMessage::new(text);
    }

    /// The document being edited.
    pub const fn document(&self) -> &Document {
        &self.doc
    }

    /// Cursor and viewport.
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// The current message, expired or not.
    pub fn status_text(&self) -> &str {
        self.status.text()
    }

    /// The terminal the editor draws on.
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Mutable access to the terminal, for feeding a scripted session.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Whether the session is still going.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Run until the user quits or a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.refresh_screen()?;
            if let Some(key) = read_key(&mut self.terminal)? {
                self.process_key(key)?;
            }
        }
        Ok(())
    }

    /// Compose the current state into one frame and write it.
    pub fn refresh_screen(&mut self) -> Result<()> {
        self.view.scroll(&self.doc);
        let message = self.status.visible(self.config.message_timeout);
        compose_frame(&mut self.output, &self.doc, &self.view, message);
        self.output
            .flush_to(&mut self.terminal)
            .map_err(EditorError::Write)
    }

    /// Handle one key.
    pub fn process_key(&mut self, key: Key) -> Result<()> {
        match key {
            Key::Char(ENTER) => self.insert_newline(),

            Key::Char(c) if c == ctrl(b'q') => {
                if self.doc.is_dirty() && self.quit_times > 0 {
                    self.set_status(format!(
                        "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                        self.quit_times
                    ));
                    self.quit_times -= 1;
                    return Ok(());
                }
                return self.quit();
            }

            Key::Char(c) if c == ctrl(b's') => self.save()?,
            Key::Char(c) if c == ctrl(b'f') => self.find()?,

            Key::Home => self.view.home(),
            Key::End => self.view.end(&self.doc),

            Key::Char(BACKSPACE) => self.delete_char(),
            Key::Char(c) if c == ctrl(b'h') => self.delete_char(),
            Key::Delete => self.delete_forward(),

            Key::PageUp | Key::PageDown => self.view.page(&self.doc, key),
            Key::Left | Key::Right | Key::Up | Key::Down => self.view.move_cursor(&self.doc, key),

            Key::Char(c) if c == ctrl(b'l') => {}
            Key::Escape => {}

            Key::Char(c) => self.insert_char(c),
        }

        self.quit_times = self.config.quit_times;
        Ok(())
    }

    /// Clear the screen and stop the loop.
    fn quit(&mut self) -> Result<()> {
        info!("quitting");
        self.output.clear();
        self.output.clear_screen();
        self.output.cursor_home();
        self.output
            .flush_to(&mut self.terminal)
            .map_err(EditorError::Write)?;
        self.running = false;
        Ok(())
    }

    /// Insert a byte at the cursor.
    ///
    /// On the line past the end of the file an empty row is created first.
    pub fn insert_char(&mut self, byte: u8) {
        if self.view.cy == self.doc.len() {
            self.doc.insert_row(self.doc.len(), Vec::new());
        }
        self.doc.row_insert_char(self.view.cy, self.view.cx, byte);
        self.view.cx += 1;
    }

    /// Break the line at the cursor.
    pub fn insert_newline(&mut self) {
        if self.view.cx == 0 {
            self.doc.insert_row(self.view.cy, Vec::new());
        } else {
            self.doc.split_row(self.view.cy, self.view.cx);
        }
        self.view.cy += 1;
        self.view.cx = 0;
    }

    /// Delete the byte before the cursor, joining lines at column 0.
    pub fn delete_char(&mut self) {
        let View { cx, cy, .. } = self.view;
        if cy == self.doc.len() || (cx == 0 && cy == 0) {
            return;
        }

        if cx > 0 {
            self.doc.row_delete_char(cy, cx - 1);
            self.view.cx -= 1;
        } else {
            self.view.cx = self.doc.row_len(cy - 1);
            self.doc.join_rows(cy - 1);
            self.view.cy -= 1;
        }
    }

    /// Delete the byte under the cursor, pulling the next line up at the end
    /// of a line.
    pub fn delete_forward(&mut self) {
        let View { cx, cy, .. } = self.view;
        if cy >= self.doc.len() {
            return;
        }
        if cx < self.doc.row_len(cy) {
            self.doc.row_delete_char(cy, cx);
        } else {
            self.doc.join_rows(cy);
        }
    }

    /// Save, asking for a name first if the document has none.
    pub fn save(&mut self) -> Result<()> {
        if self.doc.filename().is_none() {
            let Some(name) = self.prompt("Save as: {} (ESC to cancel)", |_, _, _| {})? else {
                self.set_status("Save aborted");
                return Ok(());
            };
            self.doc.set_filename(name);
        }

        match self.doc.save() {
            Ok(bytes) => self.set_status(format!("{bytes} bytes written to disk")),
            Err(e) => {
                warn!("save failed: {e}");
                self.set_status(format!("Can't save! I/O error: {e}"));
            }
        }
        Ok(())
    }

    /// Incremental search. Cancelling puts the cursor and scroll back.
    pub fn find(&mut self) -> Result<()> {
        let saved = self.view.save();
        let mut search = Search::new();

        let query = self.prompt("Search: {} (Use ESC/Arrows/Enter)", |editor, query, key| {
            search.on_key(&mut editor.doc, &mut editor.view, query, key);
        })?;

        if query.is_none() {
            self.view.restore(saved);
        }
        Ok(())
    }

    /// Read a line of input on the message bar.
    ///
    /// `template` is shown with `{}` replaced by the input so far. `callback`
    /// sees every keystroke together with the current input. Returns `None`
    /// if the user pressed Escape.
    pub fn prompt<F>(&mut self, template: &str, mut callback: F) -> Result<Option<String>>
    where
        F: FnMut(&mut Self, &str, Key),
    {
        let mut input = String::new();

        loop {
            self.set_status(template.replace("{}", &input));
            self.refresh_screen()?;

            let Some(key) = read_key(&mut self.terminal)? else {
                continue;
            };

            match key {
                Key::Delete | Key::Char(BACKSPACE) => {
                    input.pop();
                }
                Key::Char(c) if c == ctrl(b'h') => {
                    input.pop();
                }
                Key::Escape => {
                    self.set_status("");
                    callback(self, &input, key);
                    return Ok(None);
                }
                Key::Char(ENTER) => {
                    if !input.is_empty() {
                        self.set_status("");
                        callback(self, &input, key);
                        return Ok(Some(input));
                    }
                }
                Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => input.push(char::from(c)),
                _ => {}
            }

            callback(self, &input, key);
        }
    }
}
