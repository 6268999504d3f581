//! End-to-end sessions: keystrokes in, frames and files out.

use kilo::{Editor, EditorConfig, Key, ScriptedTerminal};
use std::fs;

const CTRL_F: u8 = 0x06;
const CTRL_Q: u8 = 0x11;
const CTRL_S: u8 = 0x13;

fn session(input: &[u8]) -> Editor<ScriptedTerminal> {
    let mut terminal = ScriptedTerminal::new(80, 24);
    terminal.push_input(input);
    Editor::new(terminal, EditorConfig::default()).unwrap()
}

fn rows(editor: &Editor<ScriptedTerminal>) -> Vec<String> {
    editor
        .document()
        .rows()
        .iter()
        .map(|row| String::from_utf8_lossy(row.chars()).into_owned())
        .collect()
}

#[test]
fn test_empty_screen_at_80x24() {
    let mut editor = session(b"");
    editor.refresh_screen().unwrap();

    let frame = editor.terminal().last_frame_text();
    assert!(frame.starts_with("\x1b[?25l\x1b[H"));
    assert!(frame.contains("Kilo Editor -- version"));
    assert!(frame.contains("\x1b[7m[No Name] - 0 lines"));
    assert!(frame.contains("no ft | 1/0\x1b[m\r\n"));
    assert!(frame.ends_with("\x1b[1;1H\x1b[?25h"));
    // 22 text rows, each cleared to the end of the line.
    assert_eq!(frame.matches("\x1b[K\r\n").count(), 22);
}

#[test]
fn test_typing_and_quit_confirmation() {
    let mut input = b"hello\rworld".to_vec();
    input.extend([CTRL_Q; 4]);
    let mut editor = session(&input);
    editor.run().unwrap();

    assert!(!editor.is_running());
    assert_eq!(editor.terminal().pending_input(), 0);
    assert_eq!(rows(&editor), ["hello", "world"]);
    assert_eq!(editor.terminal().last_frame().unwrap(), b"\x1b[2J\x1b[H");

    let frames = editor.terminal().frames();
    let before_quit = String::from_utf8_lossy(&frames[frames.len() - 2]);
    assert!(before_quit.contains("Press Ctrl-Q 1 more times to quit."));
    assert!(before_quit.contains("[No Name] - 2 lines (modified)"));
}

#[test]
fn test_backspace_joins_lines() {
    let mut input = b"ab\rcd".to_vec();
    // Home, then backspace at column 0.
    input.extend(b"\x1b[H\x7f");
    input.extend([CTRL_Q; 4]);
    let mut editor = session(&input);
    editor.run().unwrap();

    assert_eq!(rows(&editor), ["abcd"]);
    assert_eq!((editor.view().cx, editor.view().cy), (2, 0));
}

#[test]
fn test_arrow_keys_move_cursor() {
    let mut editor = session(b"");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "first\nsecond\n").unwrap();
    editor.open(&path);

    // Down, End, Right (stays on the last row), Up.
    editor
        .terminal_mut()
        .push_input(b"\x1b[B\x1b[F\x1b[C\x1b[A");
    editor.terminal_mut().push_input(&[CTRL_Q]);
    editor.run().unwrap();

    assert_eq!((editor.view().cx, editor.view().cy), (5, 0));
}

#[test]
fn test_open_highlight_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("main.c");
    fs::write(&path, "int x = 1;\n").unwrap();

    let mut editor = session(b"");
    editor.open(&path);
    assert_eq!(editor.document().syntax().map(|s| s.name), Some("c"));

    editor.terminal_mut().push_input(b"// ");
    editor.terminal_mut().push_input(&[CTRL_S, CTRL_Q]);
    editor.run().unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "// int x = 1;\n");
    assert_eq!(editor.status_text(), "14 bytes written to disk");
    assert!(!editor.document().is_dirty());
}

#[test]
fn test_search_moves_to_next_match() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haystack.txt");
    fs::write(&path, "a needle\nb\nc needle\n").unwrap();

    let mut editor = session(b"");
    editor.open(&path);

    let mut input = vec![CTRL_F];
    input.extend(b"needle\x1b[B\r");
    input.push(CTRL_Q);
    editor.terminal_mut().push_input(&input);
    editor.run().unwrap();

    // Every byte of the escape sequence was consumed as one key.
    assert_eq!(editor.terminal().pending_input(), 0);
    assert_eq!((editor.view().cx, editor.view().cy), (2, 2));
    let matched = editor.document().row(2).unwrap().highlight();
    assert!(matched.iter().all(|&h| h == kilo::Highlight::Normal));
}

#[test]
fn test_search_cancel_restores_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("long.txt");
    let text: String = (0..100).map(|i| format!("line {i}\n")).collect();
    fs::write(&path, format!("{text}the needle\n")).unwrap();

    let mut editor = session(b"");
    editor.open(&path);
    editor.process_key(Key::Down).unwrap();
    editor.refresh_screen().unwrap();

    editor.terminal_mut().push_input(b"needle\x1b");
    editor.process_key(Key::ctrl(b'f')).unwrap();

    let view = editor.view();
    assert_eq!((view.cx, view.cy, view.rowoff), (0, 1, 0));
    assert_eq!(editor.status_text(), "");

    // The frames drawn during the search showed the match on the top line.
    let during = editor
        .terminal()
        .frames()
        .iter()
        .map(|f| String::from_utf8_lossy(f).into_owned())
        .find(|f| f.contains("Search: needle"))
        .unwrap();
    assert!(during.contains("\x1b[Hthe \x1b[34mneedle"));
}

#[test]
fn test_window_size_from_cursor_report() {
    let terminal = ScriptedTerminal::without_size().with_cursor_report(30, 100);
    let editor = Editor::new(terminal, EditorConfig::default()).unwrap();

    assert_eq!(editor.view().screen_rows, 28);
    assert_eq!(editor.view().screen_cols, 100);
    assert_eq!(editor.terminal().frames()[0], b"\x1b[999C\x1b[999B");
}

#[test]
fn test_window_size_failure_is_fatal() {
    let terminal = ScriptedTerminal::without_size();
    assert!(matches!(
        Editor::new(terminal, EditorConfig::default()),
        Err(kilo::EditorError::WindowSize)
    ));
}
