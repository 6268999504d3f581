//! Incremental search.
//!
//! [`Search`] is driven once per keystroke while the search prompt is open,
//! with the query as typed so far and the key just pressed:
//!
//! | Key            | Effect                                         |
//! |----------------|------------------------------------------------|
//! | Enter, Escape  | forget the last match and stop                 |
//! | Right, Down    | search forward from the last match             |
//! | Left, Up       | search backward from the last match            |
//! | anything else  | the query changed: restart forward from the top |
//!
//! A hit moves the cursor onto it and paints it with [`Highlight::Match`].
//! The row's previous highlight is kept and put back on the next keystroke,
//! so the overlay never outlives the query that produced it.

use super::view::View;
use crate::buffer::{Document, Highlight};
use crate::terminal::{Key, ENTER};

/// Search direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Towards the end of the document.
    #[default]
    Forward,
    /// Towards the start of the document.
    Backward,
}

/// Highlight of one row as it was before a match was painted on it.
#[derive(Debug, Clone)]
struct SavedHighlight {
    row: usize,
    highlight: Vec<Highlight>,
}

/// Search state carried between keystrokes of one search prompt.
#[derive(Debug, Default)]
pub struct Search {
    last_match: Option<usize>,
    direction: Direction,
    saved: Option<SavedHighlight>,
}

impl Search {
    /// Fresh state: no match yet, searching forward.
    pub fn new() -> Self {
        Self::default()
    }

    /// Row of the current match.
    pub const fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Current direction.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Handle one keystroke of the search prompt.
    pub fn on_key(&mut self, doc: &mut Document, view: &mut View, query: &str, key: Key) {
        if let Some(saved) = self.saved.take() {
            doc.restore_highlight(saved.row, saved.highlight);
        }

        match key {
            Key::Char(ENTER) | Key::Escape => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return;
            }
            Key::Right | Key::Down => self.direction = Direction::Forward,
            Key::Left | Key::Up => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }

        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }

        let needle = query.as_bytes();
        let rows = doc.len();
        if rows == 0 {
            return;
        }

        // With no previous match, start just before row 0.
        let mut current = self.last_match.unwrap_or(rows - 1);
        for _ in 0..rows {
            current = match self.direction {
                Direction::Forward => (current + 1) % rows,
                Direction::Backward => current.checked_sub(1).unwrap_or(rows - 1),
            };

            let Some(offset) = doc.find_in_row(current, needle) else {
                continue;
            };

            self.last_match = Some(current);
            view.cy = current;
            view.cx = doc
                .row(current)
                .map_or(0, |row| row.rx_to_cx(offset, doc.tab_stop()));
            // Past the end, so the next scroll puts the match on the top line.
            view.rowoff = rows;

            if let Some(highlight) = doc.highlight_snapshot(current) {
                self.saved = Some(SavedHighlight {
                    row: current,
                    highlight,
                });
            }
            doc.overlay_match(current, offset, needle.len());
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().copied(), 8)
    }

    fn type_query(search: &mut Search, doc: &mut Document, view: &mut View, query: &str) {
        for end in 1..=query.len() {
            let key = Key::Char(query.as_bytes()[end - 1]);
            search.on_key(doc, view, &query[..end], key);
        }
    }

    #[test]
    fn test_forward_search_and_next() {
        let mut d = doc(&["a needle b", "c needle d"]);
        let mut v = View::new(10, 40);
        let mut s = Search::new();

        type_query(&mut s, &mut d, &mut v, "needle");
        assert_eq!((v.cx, v.cy), (2, 0));
        assert_eq!(v.rowoff, 2);
        assert_eq!(s.last_match(), Some(0));

        s.on_key(&mut d, &mut v, "needle", Key::Down);
        assert_eq!((v.cx, v.cy), (2, 1));
        assert_eq!(s.last_match(), Some(1));

        // Wraps around to the first row.
        s.on_key(&mut d, &mut v, "needle", Key::Right);
        assert_eq!(v.cy, 0);
    }

    #[test]
    fn test_backward_search_wraps() {
        let mut d = doc(&["x", "hit one", "y", "hit two"]);
        let mut v = View::new(10, 40);
        let mut s = Search::new();

        type_query(&mut s, &mut d, &mut v, "hit");
        assert_eq!(v.cy, 1);

        s.on_key(&mut d, &mut v, "hit", Key::Up);
        assert_eq!(v.cy, 3);
        assert_eq!(s.direction(), Direction::Backward);

        s.on_key(&mut d, &mut v, "hit", Key::Left);
        assert_eq!(v.cy, 1);
    }

    #[test]
    fn test_match_column_accounts_for_tabs() {
        let mut d = doc(&["\tfoo"]);
        let mut v = View::new(10, 40);
        let mut s = Search::new();

        type_query(&mut s, &mut d, &mut v, "foo");
        assert_eq!((v.cx, v.cy), (1, 0));
    }

    #[test]
    fn test_overlay_is_painted_and_restored() {
        let mut d = doc(&["int x = 42;", "other"]);
        d.set_filename("t.c");
        let original = d.row(0).unwrap().highlight().to_vec();
        let mut v = View::new(10, 40);
        let mut s = Search::new();

        type_query(&mut s, &mut d, &mut v, "42");
        let painted = d.row(0).unwrap().highlight();
        assert_eq!(&painted[8..10], &[Highlight::Match, Highlight::Match]);
        assert_eq!(painted[0], Highlight::Type);

        // Extending the query so nothing matches restores the row exactly.
        s.on_key(&mut d, &mut v, "42z", Key::Char(b'z'));
        assert_eq!(d.row(0).unwrap().highlight(), &original[..]);
        assert_eq!(s.last_match(), None);
    }

    #[test]
    fn test_enter_and_escape_reset() {
        let mut d = doc(&["abc"]);
        let mut v = View::new(10, 40);
        let mut s = Search::new();

        type_query(&mut s, &mut d, &mut v, "b");
        assert_eq!(s.last_match(), Some(0));

        s.on_key(&mut d, &mut v, "b", Key::Char(ENTER));
        assert_eq!(s.last_match(), None);
        assert!(d.row(0).unwrap().highlight().iter().all(|&h| h != Highlight::Match));
        // The cursor stays on the match.
        assert_eq!((v.cx, v.cy), (1, 0));

        type_query(&mut s, &mut d, &mut v, "c");
        s.on_key(&mut d, &mut v, "c", Key::Escape);
        assert_eq!(s.last_match(), None);
        assert_eq!(s.direction(), Direction::Forward);
    }

    #[test]
    fn test_navigation_without_match_searches_forward() {
        let mut d = doc(&["zz", "zz"]);
        let mut v = View::new(10, 40);
        let mut s = Search::new();

        s.on_key(&mut d, &mut v, "zz", Key::Up);
        assert_eq!(s.direction(), Direction::Forward);
        assert_eq!(v.cy, 0);
    }

    #[test]
    fn test_empty_document() {
        let mut d = doc(&[]);
        let mut v = View::new(10, 40);
        let mut s = Search::new();
        s.on_key(&mut d, &mut v, "x", Key::Char(b'x'));
        assert_eq!(s.last_match(), None);
    }

    #[test]
    fn test_empty_query_matches_start_of_first_row() {
        let mut d = doc(&["abc", "xyz"]);
        let original = d.row(0).unwrap().highlight().to_vec();
        let mut v = View::new(10, 40);
        v.cx = 2;
        v.cy = 1;
        let mut s = Search::new();

        s.on_key(&mut d, &mut v, "", Key::Char(127));
        assert_eq!(s.last_match(), Some(0));
        assert_eq!((v.cx, v.cy), (0, 0));
        // Nothing is painted for a zero-length hit.
        assert_eq!(d.row(0).unwrap().highlight(), &original[..]);

        s.on_key(&mut d, &mut v, "", Key::Down);
        assert_eq!(s.last_match(), Some(1));
    }
}
