use std::fmt;

use crate::{
    ast::Location,
    error::{ErrorKind, Report},
};

/// A rendered-ready error report produced by any stage of the pipeline.
///
/// The rendering is stable and is the only form in which errors reach users:
///
/// ```text
/// <file>:<line>:<col>: <Kind>: <message>
///   <source line>
///   <caret>
/// ```
///
/// The last two lines are present only when a snippet is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The stage the error comes from.
    pub kind:     ErrorKind,
    /// The file label the source was loaded under.
    pub file:     String,
    /// Where the error happened, when known.
    pub location: Option<Location>,
    /// Human readable description.
    pub message:  String,
    /// The full text of the offending line.
    pub snippet:  Option<String>,
}

impl Diagnostic {
    /// Builds a diagnostic from a stage error.
    ///
    /// ## Example
    /// ```
    /// use azhar::{
    ///     ast::Location,
    ///     error::{Diagnostic, ParseError},
    /// };
    ///
    /// let error = ParseError::UnexpectedEndOfInput { location: Location::new(2, 1) };
    /// let diagnostic = Diagnostic::from_report("main.az", &error);
    ///
    /// assert_eq!(diagnostic.to_string(),
    ///            "main.az:2:1: ParseError: Unexpected end of input in block");
    /// ```
    pub fn from_report<E: Report + ?Sized>(file: &str, error: &E) -> Self {
        Self { kind:     error.kind(),
               file:     file.to_string(),
               location: error.location(),
               message:  error.to_string(),
               snippet:  error.snippet().map(str::to_string), }
    }

    /// Fills in a missing snippet with the offending line of `source`.
    ///
    /// ## Example
    /// ```
    /// use azhar::{
    ///     ast::Location,
    ///     error::{Diagnostic, RuntimeError},
    /// };
    ///
    /// let error = RuntimeError::DivisionByZero { location: Location::new(1, 9) };
    /// let diagnostic = Diagnostic::from_report("<eval>", &error).with_source("print(1 / 0)");
    ///
    /// assert_eq!(diagnostic.render(),
    ///            "<eval>:1:9: RuntimeError: Division by zero\n  print(1 / 0)\n          ^");
    /// ```
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        if self.snippet.is_none()
           && let Some(location) = self.location
        {
            self.snippet = source.lines()
                                 .nth(location.line.saturating_sub(1))
                                 .map(str::to_string);
        }
        self
    }

    /// Renders the diagnostic in its user-facing form.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(location) => write!(f, "{}:{location}: {}: {}", self.file, self.kind, self.message)?,
            None => write!(f, "{}: {}: {}", self.file, self.kind, self.message)?,
        }

        if let (Some(snippet), Some(location)) = (&self.snippet, self.location) {
            let line = snippet.lines().next().unwrap_or_default();
            let padding = " ".repeat(location.col.saturating_sub(1));
            write!(f, "\n  {line}\n  {padding}^")?;
        }

        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
