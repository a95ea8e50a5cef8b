/// The checker state and its entry points.
///
/// Holds `TypeChecker`, the `check` convenience function and the
/// `CheckResult` alias.
pub mod core;

/// The scope arena.
///
/// Stores the chain of lexical scopes mapping names to declared types and
/// function signatures.
pub mod scope;

/// Expression typing.
///
/// Resolves the type of literals, variables, operators, calls and console
/// reads.
pub mod expression;

/// Statement checking.
///
/// Declarations, assignments, control flow conditions, blocks and function
/// definitions.
pub mod statement;

pub use self::core::{TypeChecker, check};
