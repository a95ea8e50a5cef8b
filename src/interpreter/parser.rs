/// Core parsing entry points.
///
/// Contains the program entry point, the expression entry point and the
/// shared `ParseResult` alias.
pub mod core;

/// Unary and primary expression parsing.
///
/// Handles prefix `+`/`-`, literals, variables, calls, grouping and the
/// console read expressions.
pub mod unary;

/// Binary operator parsing.
///
/// Implements one left-associative loop per precedence level, from logical
/// `or` down to multiplication.
pub mod binary;

/// Block parsing.
///
/// Parses statement sequences terminated by `end` or `else`.
pub mod block;

/// Utility functions for the parser.
///
/// Token expectations, identifier and type parsing and comma separated lists.
pub mod utils;

/// Statement parsing.
///
/// Implements declarations, assignments, control flow, function definitions
/// and the console output statements.
pub mod statement;

pub use self::core::{MAX_NESTING_DEPTH, parse};
