//! # azhar
//!
//! azhar is a small statically typed scripting language written in Rust.
//! Source text goes through four strict stages: it is tokenized, parsed into
//! a syntax tree, type checked, and finally run by a tree-walking
//! interpreter. The first error of any stage stops the pipeline and is
//! reported with its location.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{BufRead, StdinLock, Stdout, Write};

use tracing::debug;

use crate::{
    error::Diagnostic,
    interpreter::{checker::TypeChecker, evaluator::core::Interpreter, lexer::tokenize, parser::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST is
/// built by the parser, validated by the type checker and traversed by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source locations to AST nodes for error reporting.
pub mod ast;
/// Provides unified error types for every stage of the pipeline.
///
/// This module defines the errors raised while lexing, parsing, type checking
/// or running code, and the `Diagnostic` record they are all rendered through.
///
/// # Responsibilities
/// - Defines one error enum per stage.
/// - Attaches locations and source snippets for context.
/// - Renders the user-facing `<file>:<line>:<col>: <Kind>: <message>` format.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, type checking, evaluation and
/// value representations to provide a complete runtime for source code.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, checker and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The interactive prompt.
///
/// Reads chunks of source from the console, waiting for `do`/`end` pairs to
/// balance, and runs each chunk on a shared [`Session`].
pub mod repl;
/// General helpers shared by several modules.
pub mod util;

/// A type checker and an interpreter that share declarations across runs.
///
/// Each chunk passed to [`run_source`] sees every global declared by the
/// chunks that ran before it.
pub struct Session<R, W> {
    /// Validates each chunk against the globals declared so far.
    pub checker:     TypeChecker,
    /// Runs each chunk that passed the checker.
    pub interpreter: Interpreter<R, W>,
}

impl Session<StdinLock<'static>, Stdout> {
    /// Creates a session bound to the process console.
    #[must_use]
    pub fn stdio() -> Self {
        Self::with_interpreter(Interpreter::stdio())
    }
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session reading from `input` and writing to `output`.
    pub fn with_io(input: R, output: W) -> Self {
        Self::with_interpreter(Interpreter::with_io(input, output))
    }

    fn with_interpreter(interpreter: Interpreter<R, W>) -> Self {
        Self { checker: TypeChecker::new(),
               interpreter }
    }
}

/// Runs `source` through every stage of the pipeline on `session`.
///
/// `file` labels diagnostics. A program is only run once it has passed the
/// type checker, so a rejected program produces no output at all. A chunk
/// that fails at any stage leaves the session's globals as they were before
/// it, although output it already wrote stays written.
///
/// # Errors
/// Returns the first lexical, parse, type or runtime error as a
/// [`Diagnostic`] carrying the offending source line. Runtime errors raised
/// inside a function defined by an earlier chunk carry no source line, since
/// `source` does not hold it.
///
/// # Examples
/// ```
/// use azhar::{Session, run_source};
///
/// let mut session = Session::with_io("".as_bytes(), Vec::new());
///
/// run_source("let x: int = -7 / 2", "<eval>", &mut session).unwrap();
/// run_source("print(x)", "<eval>", &mut session).unwrap();
/// assert_eq!(session.interpreter.output(), b"-4\n");
///
/// let error = run_source("print(y)", "<eval>", &mut session).unwrap_err();
/// assert_eq!(error.render(),
///            "<eval>:1:7: TypeError: Undeclared variable 'y'\n  print(y)\n        ^");
/// ```
pub fn run_source<R: BufRead, W: Write>(source: &str,
                                        file: &str,
                                        session: &mut Session<R, W>)
                                        -> Result<(), Diagnostic> {
    let types = session.checker.snapshot();
    let values = session.interpreter.snapshot();

    let result = run_chunk(source, file, session);
    if result.is_err() {
        debug!(file, "rolling back failed chunk");
        session.checker.restore(types);
        session.interpreter.restore(values);
    }
    result
}

fn run_chunk<R: BufRead, W: Write>(source: &str,
                                   file: &str,
                                   session: &mut Session<R, W>)
                                   -> Result<(), Diagnostic> {
    let attach = |diagnostic: Diagnostic| diagnostic.with_source(source);

    let tokens = tokenize(source, file).map_err(attach)?;
    let program = parse(&tokens, file).map_err(attach)?;
    session.checker
           .check(&program, file)
           .map_err(attach)?;

    debug!(file, "running checked program");

    session.interpreter.run(&program).map_err(|error| {
        let diagnostic = Diagnostic::from_report(file, &error);
        match session.interpreter.failed_in() {
            Some(def) if !program.defines(def) => diagnostic,
            _ => diagnostic.with_source(source),
        }
    })
}
