use tracing::debug;

use crate::{
    ast::Program,
    error::{Diagnostic, TypeError},
    interpreter::checker::scope::{GlobalSnapshot, Scopes},
};

/// Result type used by the type checker.
pub type CheckResult<T> = Result<T, TypeError>;

/// Stores the state of the type checker.
///
/// The global scope survives between calls to [`TypeChecker::check`], so one
/// checker can validate a program delivered in several chunks, as the REPL
/// does. A chunk that fails leaves the global scope as it was before it.
#[derive(Debug, Default)]
pub struct TypeChecker {
    pub(in crate::interpreter::checker) scopes: Scopes,
}

impl TypeChecker {
    /// Creates a checker with an empty global scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Type checks `program`, labelling diagnostics with `file`.
    ///
    /// The first error in source order is reported.
    ///
    /// ## Example
    /// ```
    /// use azhar::interpreter::{checker::TypeChecker, lexer::tokenize, parser::parse};
    ///
    /// let mut checker = TypeChecker::new();
    /// let mut check = |source: &str| {
    ///     let tokens = tokenize(source, "<repl>").unwrap();
    ///     checker.check(&parse(&tokens, "<repl>").unwrap(), "<repl>")
    /// };
    ///
    /// assert!(check("let a: int = 3").is_ok());
    /// assert!(check("print(a + 1)").is_ok());
    ///
    /// let error = check("a = \"s\"").unwrap_err();
    /// assert_eq!(error.to_string(), "<repl>:1:1: TypeError: Cannot assign string to int");
    /// ```
    pub fn check(&mut self, program: &Program, file: &str) -> Result<(), Diagnostic> {
        let snapshot = self.scopes.snapshot();

        match self.check_statements(&program.statements) {
            Ok(()) => {
                debug!(file, "type check passed");
                Ok(())
            },
            Err(error) => {
                self.scopes.restore(snapshot);
                debug!(file, %error, "type check failed");
                Err(Diagnostic::from_report(file, &error))
            },
        }
    }

    /// Copies the global declarations so a chunk can be undone after it
    /// passed the checker.
    pub(crate) fn snapshot(&self) -> GlobalSnapshot {
        self.scopes.snapshot()
    }

    /// Brings the global declarations back to `snapshot`.
    pub(crate) fn restore(&mut self, snapshot: GlobalSnapshot) {
        self.scopes.restore(snapshot);
    }
}

/// Type checks a standalone program with a fresh checker.
pub fn check(program: &Program, file: &str) -> Result<(), Diagnostic> {
    TypeChecker::new().check(program, file)
}
