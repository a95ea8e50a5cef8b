/// Checked integer arithmetic.
///
/// This module provides the integer operations of the language: addition,
/// subtraction, multiplication, negation and floor division. Each one reports
/// overflow, and division by zero, as a `RuntimeError` located at the
/// operator instead of wrapping or panicking.
pub mod num;
