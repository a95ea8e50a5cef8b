use thiserror::Error;

use crate::{
    ast::Location,
    error::{ErrorKind, Report},
};

/// The reason a lexeme could not be turned into a token.
///
/// This is also the error type of the `logos` lexer, so it must provide a
/// default for input no pattern matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalErrorKind {
    /// No token starts with this character.
    #[default]
    UnexpectedCharacter,
    /// A `!` that is not part of `!=`.
    StrayBang,
    /// A string literal reaches the end of input without its closing quote.
    UnterminatedString,
    /// A numeric literal followed by `.`.
    FloatLiteral,
    /// An integer literal outside the signed 64-bit range.
    IntegerTooLarge,
}

/// An error raised while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct LexicalError {
    /// Why tokenizing failed.
    pub kind:        LexicalErrorKind,
    /// Human readable description.
    pub message:     String,
    /// Location of the first character of the offending lexeme.
    pub location:    Location,
    /// The full text of the offending line.
    pub source_line: String,
}

impl LexicalError {
    /// Builds an error for `lexeme`, found at `location` on `source_line`.
    ///
    /// ## Example
    /// ```
    /// use azhar::{
    ///     ast::Location,
    ///     error::{LexicalError, LexicalErrorKind},
    /// };
    ///
    /// let error = LexicalError::new(LexicalErrorKind::UnexpectedCharacter,
    ///                               "@",
    ///                               Location::new(1, 5),
    ///                               "let @ = 1");
    ///
    /// assert_eq!(error.to_string(), "Unexpected character '@'");
    /// ```
    #[must_use]
    pub fn new(kind: LexicalErrorKind,
               lexeme: &str,
               location: Location,
               source_line: &str)
               -> Self {
        let message = match kind {
            LexicalErrorKind::UnexpectedCharacter => {
                let character = lexeme.chars().next().unwrap_or(' ');
                format!("Unexpected character {character:?}")
            },
            LexicalErrorKind::StrayBang => "Unexpected '!'".to_string(),
            LexicalErrorKind::UnterminatedString => "Unterminated string.".to_string(),
            LexicalErrorKind::FloatLiteral => "Floats are not supported.".to_string(),
            LexicalErrorKind::IntegerTooLarge => "Integer literal is too large.".to_string(),
        };

        Self { kind,
               message,
               location,
               source_line: source_line.to_string() }
    }
}

impl Report for LexicalError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Lexical
    }

    fn location(&self) -> Option<Location> {
        Some(self.location)
    }

    fn snippet(&self) -> Option<&str> {
        Some(&self.source_line)
    }
}
