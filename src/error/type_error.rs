use thiserror::Error;

use crate::{
    ast::{BinaryOperator, Location, Type, UnaryOperator},
    error::{ErrorKind, Report},
};

/// Represents all errors the type checker can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A variable was read but no enclosing scope declares it.
    #[error("Undeclared variable '{name}'")]
    UndeclaredVariable {
        /// The name of the variable.
        name:     String,
        /// Location of the read.
        location: Location,
    },
    /// A variable was assigned but no enclosing scope declares it.
    #[error("Variable '{name}' not declared")]
    AssignmentToUndeclared {
        /// The name of the variable.
        name:     String,
        /// Location of the assignment.
        location: Location,
    },
    /// The value of a declaration or assignment does not have the declared
    /// type.
    #[error("Cannot assign {found} to {expected}")]
    Mismatch {
        /// The declared type.
        expected: Type,
        /// The type of the assigned expression.
        found:    Type,
        /// Location of the variable name.
        location: Location,
    },
    /// A binary operator applied to operands it does not accept.
    #[error("Operator '{op}' requires {requirement}, found {left} and {right}")]
    BinaryOperands {
        /// The operator.
        op:          BinaryOperator,
        /// What the operator accepts.
        requirement: &'static str,
        /// Type of the left operand.
        left:        Type,
        /// Type of the right operand.
        right:       Type,
        /// Location of the operator.
        location:    Location,
    },
    /// A unary operator applied to an operand it does not accept.
    #[error("Unary '{op}' requires an int operand, found {found}")]
    UnaryOperand {
        /// The operator.
        op:       UnaryOperator,
        /// Type of the operand.
        found:    Type,
        /// Location of the operator.
        location: Location,
    },
    /// The condition of an `if` or `while` is not a `bool`.
    #[error("{construct} condition must be bool, found {found}")]
    Condition {
        /// `if` or `while`.
        construct: &'static str,
        /// Type of the condition.
        found:     Type,
        /// Location of the keyword.
        location:  Location,
    },
    /// A call to a name with no visible function signature.
    #[error("Undefined function '{name}'")]
    UndefinedFunction {
        /// The name of the function.
        name:     String,
        /// Location of the call.
        location: Location,
    },
    /// A call with the wrong number of arguments.
    #[error("Function '{name}' expects {expected} argument(s), found {found}")]
    ArgumentCount {
        /// The name of the function.
        name:     String,
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
        /// Location of the call.
        location: Location,
    },
    /// A call argument whose type differs from the parameter type.
    #[error("Argument {position} of '{name}' must be {expected}, found {found}")]
    ArgumentType {
        /// The name of the function.
        name:     String,
        /// 1-based argument position.
        position: usize,
        /// The declared parameter type.
        expected: Type,
        /// The type of the argument.
        found:    Type,
        /// Location of the argument.
        location: Location,
    },
}

impl Report for TypeError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Type
    }

    fn location(&self) -> Option<Location> {
        match self {
            Self::UndeclaredVariable { location, .. }
            | Self::AssignmentToUndeclared { location, .. }
            | Self::Mismatch { location, .. }
            | Self::BinaryOperands { location, .. }
            | Self::UnaryOperand { location, .. }
            | Self::Condition { location, .. }
            | Self::UndefinedFunction { location, .. }
            | Self::ArgumentCount { location, .. }
            | Self::ArgumentType { location, .. } => Some(*location),
        }
    }
}
