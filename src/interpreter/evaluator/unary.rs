use std::io::{BufRead, Write};

use crate::{
    ast::{Location, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
    util::num::neg_checked,
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: integer identity.
    /// - `Negate`: integer negation, failing with `RuntimeError::Overflow` for
    ///   `i64::MIN`.
    ///
    /// Anything but an integer operand is `RuntimeError::InvalidOperands`.
    ///
    /// ## Example
    /// ```
    /// use azhar::{
    ///     ast::{Location, UnaryOperator},
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// type Console = Interpreter<&'static [u8], Vec<u8>>;
    ///
    /// let v = Console::eval_unary(UnaryOperator::Negate, &Value::Integer(5), Location::new(1, 1));
    /// assert_eq!(v.unwrap(), Value::Integer(-5));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, location: Location) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, Value::Integer(n)) => Ok(Value::Integer(*n)),
            (UnaryOperator::Negate, Value::Integer(n)) => {
                Ok(Value::Integer(neg_checked(*n, location)?))
            },
            _ => Err(RuntimeError::InvalidOperands { op: op.to_string(),
                                                     operands: value.repr(),
                                                     location }),
        }
    }
}
