/// Kinds of tokens to find in the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `.`
    Dot,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `/`
    Slash,
    /// `*`
    Star,
    /// `,`
    Comma,
    /// A float literal
    Number,
    /// One of the reserved function names
    Function,
    /// Synthetic token closing every token stream
    Eof,
    /// Only carried by errors, never part of a token stream
    Unknown,
}

impl TokenKind {
    /// Get the kind of a single character punctuation token, if `c` is one
    pub fn from_punctuation(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            '.' => Some(Self::Dot),
            '-' => Some(Self::Minus),
            '+' => Some(Self::Plus),
            '/' => Some(Self::Slash),
            '*' => Some(Self::Star),
            ',' => Some(Self::Comma),
            _ => None,
        }
    }
}

/// A lexical unit together with the span of source it was read from.
///
/// `column` is the zero-based character offset of the first character, and
/// `length` the number of characters spanned. Both are enough to point at the
/// token in the original source without scanning it again.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    literal: Option<f64>,
    column: usize,
    length: usize,
}

impl Token {
    pub(crate) fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<f64>,
        column: usize,
        length: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            column,
            length,
        }
    }

    /// The end of input token. Its length is 1 so that a caret can still be
    /// drawn under it.
    pub(crate) fn eof(column: usize) -> Self {
        Self::new(TokenKind::Eof, "EOF", None, column, 1)
    }

    /// What kind of token this is
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source text of the token, or `EOF` for the end of input
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The parsed value of number tokens
    pub fn literal(&self) -> Option<f64> {
        self.literal
    }

    /// Zero-based column of the first character
    pub fn column(&self) -> usize {
        self.column
    }

    /// Number of characters spanned
    pub fn length(&self) -> usize {
        self.length
    }
}
