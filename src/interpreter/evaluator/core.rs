use std::{
    io::{self, BufRead, StdinLock, Stdout, Write},
    rc::Rc,
};

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDef, Location, Program},
    error::RuntimeError,
    interpreter::{
        builtin::Builtin,
        evaluator::environment::{Environments, Globals},
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How control leaves a statement.
///
/// `break` and `return` are not errors: they travel back up through the
/// statement handlers as values until a loop or a call consumes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next statement.
    Normal,
    /// Leave the innermost loop. Carries the location of the `break`.
    Break(Location),
    /// Leave the innermost function call with a value.
    Return(Value),
}

/// Stores the runtime evaluation state.
///
/// This struct holds the environment chain and the console streams that
/// `print`, `output`, `read_string` and `read_int` use.
///
/// ## Usage
///
/// An `Interpreter` is created once and can run several programs in turn;
/// globals declared by one run stay visible to the next, which is how the
/// REPL keeps state between prompts.
pub struct Interpreter<R, W> {
    pub(in crate::interpreter::evaluator) env: Environments,
    pub(in crate::interpreter::evaluator) depth: usize,
    /// The innermost user function whose body failed during the last run.
    pub(in crate::interpreter::evaluator) fault: Option<Rc<FunctionDef>>,
    input: R,
    output: W,
}

impl Interpreter<StdinLock<'static>, Stdout> {
    /// Creates an interpreter bound to the process console.
    #[must_use]
    pub fn stdio() -> Self {
        Self::with_io(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Creates an interpreter reading from `input` and writing to `output`.
    ///
    /// ## Example
    /// ```
    /// use azhar::interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse};
    ///
    /// let tokens = tokenize("print(read_int() * 2)", "<eval>").unwrap();
    /// let program = parse(&tokens, "<eval>").unwrap();
    ///
    /// let mut interpreter = Interpreter::with_io("21\n".as_bytes(), Vec::new());
    /// interpreter.run(&program).unwrap();
    ///
    /// assert_eq!(interpreter.output(), b"42\n");
    /// ```
    pub fn with_io(input: R, output: W) -> Self {
        Self { env: Environments::new(),
               depth: 0,
               fault: None,
               input,
               output }
    }

    /// The input stream.
    pub const fn input_mut(&mut self) -> &mut R {
        &mut self.input
    }

    /// The output stream.
    pub const fn output(&self) -> &W {
        &self.output
    }

    /// The output stream, mutably.
    pub const fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consumes the interpreter and returns its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// The user function in which the last failed run raised its error.
    ///
    /// `None` when the error was raised by top-level code, or when the last
    /// run succeeded.
    #[must_use]
    pub fn failed_in(&self) -> Option<&FunctionDef> {
        self.fault.as_deref()
    }

    /// Copies the global bindings so a failed run can be undone.
    #[must_use]
    pub fn snapshot(&self) -> Globals {
        self.env.snapshot()
    }

    /// Brings the globals back to `snapshot` and leaves every call.
    pub fn restore(&mut self, snapshot: Globals) {
        self.env.restore(snapshot);
        self.depth = 0;
    }

    /// Runs every top-level statement of `program` in the global environment.
    ///
    /// A top-level `return` ends the program early without error; a `break`
    /// outside of any loop is a runtime error.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        debug!(statements = program.statements.len(), "running program");
        self.fault = None;

        for statement in &program.statements {
            match self.exec_statement(statement)? {
                Flow::Normal => {},
                Flow::Break(location) => return Err(RuntimeError::BreakOutsideLoop { location }),
                Flow::Return(_) => break,
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// variables, unary and binary operations, function calls and console
    /// reads.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(value.into()),
            Expr::Variable { name, location } => {
                self.env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name:     name.clone(),
                                                                     location: *location, })
            },
            Expr::UnaryOp { op, expr, location } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *location)
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             location, } => self.eval_binary_op(left, *op, right, *location),
            Expr::Call { name,
                         arguments,
                         location, } => self.eval_call(name, arguments, *location),
            Expr::ReadInput { kind, location } => {
                self.call_builtin(Builtin::from(*kind), &[], *location)
            },
        }
    }
}
