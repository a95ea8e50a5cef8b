use thiserror::Error;

use crate::{
    ast::Location,
    error::{ErrorKind, Report},
};

/// Represents all errors that can occur while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A specific token was required but something else was found.
    #[error("Expected {expected}, found {found}")]
    Expected {
        /// Description of the required token.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// Location of the token actually found.
        location: Location,
    },
    /// A token that cannot start an expression.
    #[error("Unexpected token in expression: {token}")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Location of the token.
        location: Location,
    },
    /// A `do` block of a function, `if` or `while` was not closed by `end`.
    #[error("Expected 'end' to close {construct}")]
    Unclosed {
        /// The construct left open (`function`, `if`, `while`, `block`).
        construct: &'static str,
        /// Location of the keyword opening the construct.
        location:  Location,
    },
    /// Expressions or blocks nested deeper than the parser accepts.
    #[error("Nesting deeper than {limit} levels")]
    NestingTooDeep {
        /// The maximum nesting depth.
        limit:    usize,
        /// Location of the construct that went one level too deep.
        location: Location,
    },
    /// Reached the end of input inside a block.
    #[error("Unexpected end of input in block")]
    UnexpectedEndOfInput {
        /// Location of the end of input.
        location: Location,
    },
}

impl Report for ParseError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Parse
    }

    fn location(&self) -> Option<Location> {
        match self {
            Self::Expected { location, .. }
            | Self::UnexpectedToken { location, .. }
            | Self::Unclosed { location, .. }
            | Self::NestingTooDeep { location, .. }
            | Self::UnexpectedEndOfInput { location } => Some(*location),
        }
    }
}
