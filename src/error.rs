use std::fmt;

use crate::ast::Location;

/// Lexing errors.
///
/// Raised by the lexer for characters and literals it cannot turn into
/// tokens: unterminated strings, float literals, stray characters.
pub mod lexical_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree:
/// missing expected tokens, unexpected tokens in expression position and
/// unclosed blocks.
pub mod parse_error;
/// Static type errors.
///
/// Raised by the type checker for undeclared names, operand and argument type
/// mismatches and wrong call arity.
pub mod type_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during execution, such as
/// undefined names, invalid console input, overflow and division by zero.
pub mod runtime_error;
/// User-facing diagnostics.
///
/// Turns any stage error into the stable `<file>:<line>:<col>: <Kind>:
/// <message>` rendering, optionally followed by the offending source line and
/// a caret.
pub mod diagnostic;

pub use diagnostic::Diagnostic;
pub use lexical_error::{LexicalError, LexicalErrorKind};
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use type_error::TypeError;

/// The pipeline stage an error originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Raised by the lexer.
    Lexical,
    /// Raised by the parser.
    Parse,
    /// Raised by the type checker.
    Type,
    /// Raised by the interpreter.
    Runtime,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lexical => "LexicalError",
            Self::Parse => "ParseError",
            Self::Type => "TypeError",
            Self::Runtime => "RuntimeError",
        };
        write!(f, "{name}")
    }
}

/// Common view over the errors of every pipeline stage.
///
/// Implementors describe which stage they belong to and where in the source
/// they happened, so that [`Diagnostic`] can render them uniformly.
pub trait Report: std::error::Error {
    /// The stage this error belongs to.
    fn kind(&self) -> ErrorKind;

    /// Where the error happened, when known.
    fn location(&self) -> Option<Location>;

    /// The offending source line, when the stage had it at hand.
    fn snippet(&self) -> Option<&str> {
        None
    }
}
