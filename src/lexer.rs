use crate::error::{Error, ErrorKind};
use crate::token::{Token, TokenKind};
use crate::util::{FUNCTIONS, POW};

#[must_use]
/// Check if `ident` is one of the reserved function names
///
/// # Examples
///
/// ```
/// # use tally::is_function_name;
///
/// assert_eq!(is_function_name("sqrt"), true);
/// assert_eq!(is_function_name("pow"), true);
/// assert_eq!(is_function_name("log"), false);
/// ```
pub fn is_function_name(ident: &str) -> bool {
    ident == POW || FUNCTIONS.contains_key(ident)
}

/// Scan `source` into tokens, closed by an end of input token.
///
/// # Examples
///
/// ```
/// # use tally::{scan, TokenKind};
/// let tokens = scan("sqrt(2)").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Function, TokenKind::LeftParen, TokenKind::Number, TokenKind::RightParen, TokenKind::Eof]
/// );
/// ```
pub fn scan(source: &str) -> Result<Vec<Token>, Error> {
    Lexer::new(source).tokenize()
}

/// An helper struct for lexing the input
///
/// `start` and `current` are byte offsets into the source, `column` counts
/// the characters consumed so far.
pub struct Lexer<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            source,
            start: 0,
            current: 0,
            column: 0,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        while let Some(c) = self.advance() {
            if let Some(token) = self.next_token(c)? {
                tracing::trace!(kind = ?token.kind(), lexeme = token.lexeme(), column = token.column(), "token");
                output.push(token);
            }
            self.start = self.current;
        }
        output.push(Token::eof(self.column + 1));
        Ok(output)
    }

    fn next_token(&mut self, c: char) -> Result<Option<Token>, Error> {
        if let Some(kind) = TokenKind::from_punctuation(c) {
            return Ok(Some(self.token(kind, None)));
        }
        match c {
            ' ' | '\t' | '\r' => Ok(None),
            '\n' => Err(Error::with_message(
                ErrorKind::Syntax,
                self.token(TokenKind::Unknown, None),
                "Line break not allowed",
            )),
            c if c.is_ascii_digit() => self.number().map(Some),
            c if c.is_alphabetic() => self.identifier().map(Some),
            _ => Err(Error::syntax(self.token(TokenKind::Unknown, None))),
        }
    }

    fn number(&mut self) -> Result<Token, Error> {
        self.skip_while(|c| c.is_ascii_digit());
        // A dot is only part of the number when a digit follows it
        if self.peek() == Some('.') && self.peek_next().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
            self.skip_while(|c| c.is_ascii_digit());
        }
        let text = &self.source[self.start..self.current];
        let message = match text.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                return Ok(self.token(TokenKind::Number, Some(value)))
            }
            Ok(_) => "Number out of range".to_string(),
            Err(err) => err.to_string(),
        };
        Err(Error::with_message(
            ErrorKind::Syntax,
            self.token(TokenKind::Unknown, None),
            message,
        ))
    }

    fn identifier(&mut self) -> Result<Token, Error> {
        self.skip_while(char::is_alphanumeric);
        if is_function_name(&self.source[self.start..self.current]) {
            Ok(self.token(TokenKind::Function, None))
        } else {
            Err(Error::undefined(self.token(TokenKind::Unknown, None)))
        }
    }

    /// Build a token spanning from `start` to `current`
    fn token(&self, kind: TokenKind, literal: Option<f64>) -> Token {
        let text = &self.source[self.start..self.current];
        let length = text.chars().count();
        Token::new(kind, text, literal, self.column - length, length)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        self.column += 1;
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn skip_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().map_or(false, &predicate) {
            self.advance();
        }
    }
}
