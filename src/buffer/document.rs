//! Document: the ordered rows of the file being edited.

use super::row::{Row, RowFormat};
use super::syntax::Syntax;
use super::Highlight;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::info;

/// The text buffer.
///
/// Rows are addressed by index only. Inserting or deleting a row shifts every
/// later index, so callers look rows up again after such a call instead of
/// holding on to them.
#[derive(Debug)]
pub struct Document {
    rows: Vec<Row>,
    /// Count of edits since the last load or save.
    dirty: usize,
    filename: Option<PathBuf>,
    syntax: Option<&'static Syntax>,
    tab_stop: usize,
}

impl Document {
    /// An empty, unnamed document.
    pub const fn new(tab_stop: usize) -> Self {
        Self {
            rows: Vec::new(),
            dirty: 0,
            filename: None,
            syntax: None,
            tab_stop,
        }
    }

    /// A document holding `lines`, unnamed and clean.
    pub fn from_lines<I, L>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        let mut doc = Self::new(tab_stop);
        for line in lines {
            doc.insert_row(doc.len(), line);
        }
        doc.dirty = 0;
        doc
    }

    /// Load `path`, replacing the current contents.
    ///
    /// On failure the document is left empty and unnamed.
    pub fn open(&mut self, path: &Path) -> io::Result<()> {
        self.rows.clear();
        self.filename = None;
        self.syntax = None;

        let bytes = fs::read(path)?;
        self.filename = Some(path.to_path_buf());
        self.syntax = Syntax::for_path(path);
        for line in split_lines(&bytes) {
            self.insert_row(self.rows.len(), line);
        }
        self.dirty = 0;

        info!(path = %path.display(), rows = self.rows.len(), "opened file");
        Ok(())
    }

    /// Write the rows to the document's file, returning the byte count.
    ///
    /// The file is truncated to the new length before writing.
    pub fn save(&mut self) -> io::Result<usize> {
        let Some(path) = self.filename.as_deref() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "no filename"));
        };

        let bytes = self.rows_to_bytes();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .mode(0o644)
            .open(path)?;
        file.set_len(bytes.len() as u64)?;
        file.write_all(&bytes)?;

        info!(path = %path.display(), bytes = bytes.len(), "saved file");
        self.dirty = 0;
        Ok(bytes.len())
    }

    /// Every row followed by a newline.
    pub fn rows_to_bytes(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|row| row.len() + 1).sum();
        let mut bytes = Vec::with_capacity(total);
        for row in &self.rows {
            bytes.extend_from_slice(row.chars());
            bytes.push(b'\n');
        }
        bytes
    }

    /// Name the document and pick a language from the new name.
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.syntax = Syntax::for_path(&path);
        self.filename = Some(path);
        self.rehighlight();
    }

    /// Force a language profile, re-highlighting every row.
    pub fn set_syntax(&mut self, syntax: Option<&'static Syntax>) {
        self.syntax = syntax;
        self.rehighlight();
    }

    fn rehighlight(&mut self) {
        for row in &mut self.rows {
            row.update_syntax(self.syntax);
        }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row `at`, if it exists.
    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    /// Length of row `at`, or 0 past the end.
    pub fn row_len(&self, at: usize) -> usize {
        self.rows.get(at).map_or(0, Row::len)
    }

    /// Edit counter; nonzero means unsaved changes.
    pub const fn dirty(&self) -> usize {
        self.dirty
    }

    /// Whether there are unsaved changes.
    pub const fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// File the document was loaded from or will be saved to.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Active language profile.
    pub const fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Tab stop used for rendering.
    pub const fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    const fn format(&self) -> RowFormat {
        RowFormat {
            tab_stop: self.tab_stop,
            syntax: self.syntax,
        }
    }

    /// Insert a row at `at`, clamped to `0..=len`.
    pub fn insert_row(&mut self, at: usize, text: impl Into<Vec<u8>>) {
        let at = at.min(self.rows.len());
        let row = Row::new(text, self.format());
        self.rows.insert(at, row);
        self.dirty += 1;
    }

    /// Remove row `at`; out of range is a no-op.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Insert a byte into row `row` at column `at` (clamped to append).
    pub fn row_insert_char(&mut self, row: usize, at: usize, byte: u8) {
        let format = self.format();
        if let Some(r) = self.rows.get_mut(row) {
            r.insert_char(at, byte, format);
            self.dirty += 1;
        }
    }

    /// Delete the byte at column `at` of row `row`; out of range is a no-op.
    pub fn row_delete_char(&mut self, row: usize, at: usize) {
        let format = self.format();
        if let Some(r) = self.rows.get_mut(row) {
            if r.delete_char(at, format) {
                self.dirty += 1;
            }
        }
    }

    /// Append bytes to row `row`.
    pub fn row_append(&mut self, row: usize, text: &[u8]) {
        let format = self.format();
        if let Some(r) = self.rows.get_mut(row) {
            r.append(text, format);
            self.dirty += 1;
        }
    }

    /// Split row `row` at column `at`; the tail becomes a new row after it.
    pub fn split_row(&mut self, row: usize, at: usize) {
        let format = self.format();
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let tail = r.split_off(at, format);
        self.insert_row(row + 1, tail);
    }

    /// Append row `row + 1` to row `row` and remove it.
    pub fn join_rows(&mut self, row: usize) {
        if row + 1 >= self.rows.len() {
            return;
        }
        let next = self.rows.remove(row + 1);
        self.row_append(row, next.chars());
    }

    /// Byte offset of the first occurrence of `needle` in row `at`'s render.
    ///
    /// An empty needle matches at offset 0.
    pub fn find_in_row(&self, at: usize, needle: &[u8]) -> Option<usize> {
        let render = self.rows.get(at)?.render();
        if needle.is_empty() {
            return Some(0);
        }
        if needle.len() > render.len() {
            return None;
        }
        render.windows(needle.len()).position(|w| w == needle)
    }

    /// Copy of row `at`'s highlight array.
    pub fn highlight_snapshot(&self, at: usize) -> Option<Vec<Highlight>> {
        self.rows.get(at).map(|row| row.highlight().to_vec())
    }

    /// Paint a search hit over row `at`'s render bytes `start..start + len`.
    pub fn overlay_match(&mut self, at: usize, start: usize, len: usize) {
        if let Some(row) = self.rows.get_mut(at) {
            row.overlay_match(start, len);
        }
    }

    /// Put back a snapshot taken with [`Document::highlight_snapshot`].
    pub fn restore_highlight(&mut self, at: usize, saved: Vec<Highlight>) {
        if let Some(row) = self.rows.get_mut(at) {
            row.restore_highlight(saved);
        }
    }
}

/// Split file contents into lines without their terminators.
///
/// Lines end at `\n`; trailing `\r` bytes are dropped. A final newline does
/// not start an extra empty line.
pub fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    let lines = (!bytes.is_empty()).then(|| body.split(|&b| b == b'\n'));
    lines.into_iter().flatten().map(|line| {
        let end = line.iter().rposition(|&b| b != b'\r').map_or(0, |i| i + 1);
        &line[..end]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().copied(), 8)
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.chars()).into_owned())
            .collect()
    }

    #[test]
    fn test_from_lines_is_clean() {
        let d = doc(&["a", "b"]);
        assert_eq!(d.len(), 2);
        assert!(!d.is_dirty());
    }

    #[test]
    fn test_insert_row_clamps() {
        let mut d = doc(&["a"]);
        d.insert_row(99, "z");
        d.insert_row(0, "first");
        assert_eq!(texts(&d), ["first", "a", "z"]);
        assert_eq!(d.dirty(), 2);
    }

    #[test]
    fn test_delete_row_out_of_range_is_noop() {
        let mut d = doc(&["a", "b"]);
        d.delete_row(2);
        assert_eq!(d.len(), 2);
        assert!(!d.is_dirty());

        d.delete_row(0);
        assert_eq!(texts(&d), ["b"]);
        assert!(d.is_dirty());
    }

    #[test]
    fn test_row_edits() {
        let mut d = doc(&["ac"]);
        d.row_insert_char(0, 1, b'b');
        d.row_append(0, b"d");
        assert_eq!(texts(&d), ["abcd"]);

        d.row_delete_char(0, 9);
        d.row_delete_char(5, 0);
        d.row_insert_char(5, 0, b'x');
        assert_eq!(texts(&d), ["abcd"]);
        assert_eq!(d.dirty(), 2);
    }

    #[test]
    fn test_split_then_join_restores_row() {
        for k in 0..=5 {
            let mut d = doc(&["hello", "next"]);
            d.split_row(0, k);
            assert_eq!(d.len(), 3);
            d.join_rows(0);
            assert_eq!(texts(&d), ["hello", "next"]);
        }
    }

    #[test]
    fn test_rows_to_bytes() {
        assert_eq!(doc(&["a", "", "b"]).rows_to_bytes(), b"a\n\nb\n");
        assert!(doc(&[]).rows_to_bytes().is_empty());
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<&[u8]> = split_lines(b"a\r\nb\n\nc").collect();
        let expected: [&[u8]; 4] = [b"a", b"b", b"", b"c"];
        assert_eq!(lines, expected);

        let lines: Vec<&[u8]> = split_lines(b"one\n").collect();
        let expected: [&[u8]; 1] = [b"one"];
        assert_eq!(lines, expected);

        assert_eq!(split_lines(b"").count(), 0);
        assert_eq!(split_lines(b"\n").count(), 1);
    }

    #[test]
    fn test_open_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.c");
        fs::write(&path, "int main() {\r\n\treturn 0;\n}\n").unwrap();

        let mut d = Document::new(8);
        d.open(&path).unwrap();
        assert_eq!(texts(&d), ["int main() {", "\treturn 0;", "}"]);
        assert_eq!(d.syntax().unwrap().name, "c");
        assert!(!d.is_dirty());
        assert_eq!(d.row(0).unwrap().highlight()[0], Highlight::Type);

        d.row_append(2, b" // end");
        let written = d.save().unwrap();
        assert!(!d.is_dirty());
        let on_disk = fs::read(&path).unwrap();
        assert_eq!(on_disk, b"int main() {\n\treturn 0;\n} // end\n");
        assert_eq!(written, on_disk.len());
    }

    #[test]
    fn test_save_truncates_longer_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "a much longer original body\n").unwrap();

        let mut d = doc(&["short"]);
        d.set_filename(&path);
        d.save().unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short\n");
    }

    #[test]
    fn test_open_missing_file_leaves_unnamed_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut d = doc(&["stale"]);
        assert!(d.open(&dir.path().join("missing.c")).is_err());
        assert!(d.is_empty());
        assert!(d.filename().is_none());
        assert!(d.syntax().is_none());
    }

    #[test]
    fn test_save_without_filename_fails() {
        let mut d = doc(&["x"]);
        d.row_append(0, b"y");
        assert!(d.save().is_err());
        assert!(d.is_dirty());
    }

    #[test]
    fn test_set_filename_rehighlights() {
        let mut d = doc(&["int x = 1;"]);
        assert!(d.row(0).unwrap().highlight().iter().all(|&h| h == Highlight::Normal));

        d.set_filename("x.c");
        assert_eq!(d.row(0).unwrap().highlight()[0], Highlight::Type);
        assert_eq!(d.row(0).unwrap().highlight()[8], Highlight::Number);

        d.set_syntax(None);
        assert!(d.row(0).unwrap().highlight().iter().all(|&h| h == Highlight::Normal));
    }

    #[test]
    fn test_find_in_row_uses_render() {
        let d = doc(&["\tneedle"]);
        assert_eq!(d.find_in_row(0, b"needle"), Some(8));
        assert_eq!(d.find_in_row(0, b"pin"), None);
        assert_eq!(d.find_in_row(0, b""), Some(0));
        assert_eq!(d.find_in_row(3, b"needle"), None);
        assert_eq!(d.find_in_row(3, b""), None);

        let empty = doc(&[""]);
        assert_eq!(empty.find_in_row(0, b""), Some(0));
    }
}
