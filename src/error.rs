use crate::token::Token;
use std::error;
use std::fmt::{self, Display, Formatter};

/// What went wrong while reading an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected character, malformed grammar or missing delimiter
    Syntax,
    /// A word that is not one of the reserved function names
    UndefinedIdentifier,
}

/// Error type for the tally crate.
///
/// Every error carries the token it was raised on, so that the offending
/// part of the input can be pointed at with [`report`](#method.report).
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    token: Token,
    message: String,
}

impl Error {
    /// `Expected expression, found '<lexeme>'`
    pub(crate) fn syntax(token: Token) -> Self {
        let message = format!("Expected expression, found '{}'", token.lexeme());
        Self::with_message(ErrorKind::Syntax, token, message)
    }

    /// `Undefined identifier '<lexeme>'`
    pub(crate) fn undefined(token: Token) -> Self {
        let message = format!("Undefined identifier '{}'", token.lexeme());
        Self::with_message(ErrorKind::UndefinedIdentifier, token, message)
    }

    pub(crate) fn with_message(kind: ErrorKind, token: Token, message: impl Into<String>) -> Self {
        Self {
            kind,
            token,
            message: message.into(),
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The token the error was raised on
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The human readable message, without position
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the error under the `source` it was produced from.
    ///
    /// The first line gives the 1-based column and the message, then comes
    /// the source line and a line of `^` under the offending token. The
    /// column is clamped to the end of the source, so that errors on the end
    /// of input point just after the last character.
    ///
    /// # Examples
    ///
    /// ```
    /// let source = "1 +1.";
    /// let error = tally::run(source).unwrap_err();
    /// assert_eq!(
    ///     error.report(source),
    ///     "Error at column 5: Expected expression, found '.':\n1 +1.\n    ^\n"
    /// );
    /// ```
    #[must_use]
    pub fn report(&self, source: &str) -> String {
        let column = self.token.column().min(source.chars().count());
        format!(
            "Error at column {}: {}:\n{}\n{}{}\n",
            column + 1,
            self.message,
            source,
            " ".repeat(column),
            "^".repeat(self.token.length())
        )
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.message)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
