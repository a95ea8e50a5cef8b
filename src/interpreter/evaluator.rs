/// Core evaluation state and expression dispatch.
///
/// Contains the `Interpreter`, the `Flow` signal type and the `EvalResult`
/// alias.
pub mod core;

/// The runtime environment arena.
///
/// Maps names to values and function definitions through a chain of nested
/// environments.
pub mod environment;

/// Statement execution.
///
/// Runs declarations, assignments, control flow and blocks, and carries
/// `break` and `return` signals to the loop or call that consumes them.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Handles checked integer arithmetic, comparisons, equality and the
/// short-circuiting logical operators.
pub mod binary;

/// Unary operator evaluation logic.
pub mod unary;

/// Function evaluation.
///
/// Handles user-defined and built-in function calls, argument binding, the
/// call depth limit and console reads.
pub mod function;

pub use self::{
    core::{EvalResult, Flow, Interpreter},
    function::MAX_CALL_DEPTH,
};
