//! Language profiles and the per-row highlighter.
//!
//! Highlighting is recomputed for a whole row whenever its rendered text
//! changes. The scan carries two bits of state from byte to byte: whether the
//! previous byte was a separator, and which quote (if any) opened the string
//! being scanned. Nothing carries over from one row to the next, so strings
//! and comments never span lines.

use super::Highlight;
use bitflags::bitflags;
use std::path::Path;

bitflags! {
    /// Optional highlighting features of a language.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SyntaxFlags: u8 {
        /// Highlight numeric literals.
        const HIGHLIGHT_NUMBERS = 0b0000_0001;
        /// Highlight single- and double-quoted strings.
        const HIGHLIGHT_STRINGS = 0b0000_0010;
    }
}

impl std::fmt::Debug for SyntaxFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A language profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    /// Name shown in the status bar.
    pub name: &'static str,
    /// Patterns matched against the filename. Patterns starting with `.`
    /// must equal the extension; others may appear anywhere in the name.
    pub filematch: &'static [&'static str],
    /// Reserved words drawn as [`Highlight::Keyword`].
    pub keywords: &'static [&'static str],
    /// Reserved words drawn as [`Highlight::Type`].
    pub types: &'static [&'static str],
    /// Marker starting a comment that runs to the end of the row.
    pub singleline_comment_start: &'static str,
    /// Feature switches.
    pub flags: SyntaxFlags,
}

/// Built-in language profiles, searched in order.
pub static HLDB: &[Syntax] = &[
    Syntax {
        name: "c",
        filematch: &[".c", ".h", ".cpp"],
        keywords: &[
            "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
            "union", "typedef", "static", "enum", "class", "case",
        ],
        types: &[
            "int", "long", "double", "float", "char", "unsigned", "signed", "void",
        ],
        singleline_comment_start: "//",
        flags: SyntaxFlags::HIGHLIGHT_NUMBERS.union(SyntaxFlags::HIGHLIGHT_STRINGS),
    },
    Syntax {
        name: "rust",
        filematch: &[".rs"],
        keywords: &[
            "as", "break", "const", "continue", "crate", "else", "enum", "extern", "fn", "for",
            "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
            "return", "self", "static", "struct", "super", "trait", "type", "unsafe", "use",
            "where", "while",
        ],
        types: &[
            "bool", "char", "str", "u8", "u16", "u32", "u64", "usize", "i8", "i16", "i32", "i64",
            "isize", "f32", "f64", "String", "Vec", "Option", "Result", "Self",
        ],
        singleline_comment_start: "//",
        flags: SyntaxFlags::HIGHLIGHT_NUMBERS.union(SyntaxFlags::HIGHLIGHT_STRINGS),
    },
    Syntax {
        name: "python",
        filematch: &[".py"],
        keywords: &[
            "and", "as", "assert", "break", "class", "continue", "def", "del", "elif", "else",
            "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
            "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
        ],
        types: &["int", "float", "str", "bool", "list", "dict", "tuple", "set", "None"],
        singleline_comment_start: "#",
        flags: SyntaxFlags::HIGHLIGHT_NUMBERS.union(SyntaxFlags::HIGHLIGHT_STRINGS),
    },
];

impl Syntax {
    /// Pick the profile for `path`, if any.
    pub fn for_path(path: &Path) -> Option<&'static Self> {
        Self::for_filename(&path.to_string_lossy())
    }

    /// Pick the profile for a filename.
    ///
    /// The extension is everything from the last `.` on.
    pub fn for_filename(filename: &str) -> Option<&'static Self> {
        let ext = filename.rfind('.').map(|i| &filename[i..]);
        HLDB.iter().find(|syntax| {
            syntax.filematch.iter().any(|pattern| {
                if pattern.starts_with('.') {
                    ext == Some(*pattern)
                } else {
                    filename.contains(pattern)
                }
            })
        })
    }

    /// Find a reserved word at the start of `text` that is followed by a
    /// separator or the end of the row.
    fn match_reserved(&self, text: &[u8]) -> Option<(usize, Highlight)> {
        let keywords = self.keywords.iter().map(|w| (w, Highlight::Keyword));
        let types = self.types.iter().map(|w| (w, Highlight::Type));
        keywords.chain(types).find_map(|(word, class)| {
            let word = word.as_bytes();
            let bounded = text
                .get(word.len())
                .map_or(true, |&next| is_separator(next));
            (text.starts_with(word) && bounded).then_some((word.len(), class))
        })
    }
}

/// Token delimiter: whitespace, NUL, or one of `,.()+-/*=~%<>[];`.
#[inline]
pub fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace()
        || byte == 0
        || byte == 0x0b
        || b",.()+-/*=~%<>[];".contains(&byte)
}

/// Classify every byte of `render` into `out`.
///
/// `out` is cleared and refilled with exactly `render.len()` entries. Without
/// a profile every byte is [`Highlight::Normal`].
pub fn highlight_row(render: &[u8], syntax: Option<&Syntax>, out: &mut Vec<Highlight>) {
    out.clear();
    out.resize(render.len(), Highlight::Normal);

    let Some(syntax) = syntax else {
        return;
    };

    let comment = syntax.singleline_comment_start.as_bytes();
    let numbers = syntax.flags.contains(SyntaxFlags::HIGHLIGHT_NUMBERS);
    let strings = syntax.flags.contains(SyntaxFlags::HIGHLIGHT_STRINGS);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut i = 0;

    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { out[i - 1] } else { Highlight::Normal };

        if !comment.is_empty() && in_string.is_none() && render[i..].starts_with(comment) {
            out[i..].fill(Highlight::Comment);
            break;
        }

        if strings {
            if let Some(quote) = in_string {
                out[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    out[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                out[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            out[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, class)) = syntax.match_reserved(&render[i..]) {
                out[i..i + len].fill(class);
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }
}
