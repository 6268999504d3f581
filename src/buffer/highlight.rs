//! Highlight classes.

/// Classification of one rendered byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    /// Plain text.
    #[default]
    Normal,
    /// Single-line comment, up to the end of the row.
    Comment,
    /// Reserved word.
    Keyword,
    /// Reserved type name.
    Type,
    /// Quoted string, quotes included.
    String,
    /// Numeric literal.
    Number,
    /// Search hit overlay.
    Match,
}

impl Highlight {
    /// SGR foreground color code used to draw this class.
    pub const fn color(self) -> u8 {
        match self {
            Self::Normal => 39,
            Self::Comment => 36,
            Self::Keyword => 33,
            Self::Type => 32,
            Self::String => 35,
            Self::Number => 31,
            Self::Match => 34,
        }
    }
}
