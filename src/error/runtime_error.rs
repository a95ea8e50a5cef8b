use thiserror::Error;

use crate::{
    ast::Location,
    error::{ErrorKind, Report},
};

/// Represents all errors that can occur while running a program.
///
/// Most variants can only be reached when a program is executed without
/// passing the type checker first, since the checker rejects the same
/// conditions statically.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A variable read found no binding in the environment chain.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable {
        /// The name of the variable.
        name:     String,
        /// Location of the read.
        location: Location,
    },
    /// A call found no function binding in the environment chain.
    #[error("Undefined function '{name}'")]
    UndefinedFunction {
        /// The name of the function.
        name:     String,
        /// Location of the call.
        location: Location,
    },
    /// An assignment found no existing binding to mutate.
    #[error("Cannot assign to undeclared variable '{name}'")]
    AssignToUndeclared {
        /// The name of the variable.
        name:     String,
        /// Location of the assignment.
        location: Location,
    },
    /// A user function was called with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), found {found}")]
    ArgumentCountMismatch {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// Location of the call.
        location: Location,
    },
    /// `read_int()` read a line that is not an integer.
    #[error("read_int got non-integer input {input:?}")]
    InvalidInteger {
        /// The line read, without surrounding whitespace.
        input:    String,
        /// Location of the read.
        location: Location,
    },
    /// Integer division with a zero divisor.
    #[error("Division by zero")]
    DivisionByZero {
        /// Location of the operator.
        location: Location,
    },
    /// An arithmetic result outside the signed 64-bit range.
    #[error("Integer overflow")]
    Overflow {
        /// Location of the operator.
        location: Location,
    },
    /// An operator applied to values it is not defined for.
    #[error("Invalid operands for '{op}': {operands}")]
    InvalidOperands {
        /// The operator.
        op:       String,
        /// The rendered operand values.
        operands: String,
        /// Location of the operator.
        location: Location,
    },
    /// Nested user function calls went deeper than the interpreter allows.
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded {
        /// The maximum number of nested calls.
        limit:    usize,
        /// Location of the call that went over the limit.
        location: Location,
    },
    /// A `break` escaped every enclosing loop.
    #[error("'break' outside of a loop")]
    BreakOutsideLoop {
        /// Location of the `break`.
        location: Location,
    },
    /// Reading from or writing to the console failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Report for RuntimeError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Runtime
    }

    fn location(&self) -> Option<Location> {
        match self {
            Self::UndefinedVariable { location, .. }
            | Self::UndefinedFunction { location, .. }
            | Self::AssignToUndeclared { location, .. }
            | Self::ArgumentCountMismatch { location, .. }
            | Self::InvalidInteger { location, .. }
            | Self::DivisionByZero { location }
            | Self::Overflow { location }
            | Self::InvalidOperands { location, .. }
            | Self::CallDepthExceeded { location, .. }
            | Self::BreakOutsideLoop { location } => Some(*location),
            Self::Io(_) => None,
        }
    }
}
