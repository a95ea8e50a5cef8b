use std::io::{BufRead, Write};

use crate::{
    ast::{BinaryOperator, Expr, Location},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::Value,
    },
    util::num::{add_checked, floor_div_checked, mul_checked, sub_checked},
};

impl<R: BufRead, W: Write> Interpreter<R, W> {
    /// Evaluates both sides of a binary expression and combines them.
    ///
    /// `and` and `or` evaluate their right operand only when the left one
    /// does not already decide the result. Both operands are coerced to
    /// booleans with [`Value::is_truthy`].
    pub(in crate::interpreter::evaluator) fn eval_binary_op(&mut self,
                                                             left: &Expr,
                                                             op: BinaryOperator,
                                                             right: &Expr,
                                                             location: Location)
                                                             -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                let result = self.eval(left)?.is_truthy() && self.eval(right)?.is_truthy();
                Ok(Value::Bool(result))
            },
            BinaryOperator::Or => {
                let result = self.eval(left)?.is_truthy() || self.eval(right)?.is_truthy();
                Ok(Value::Bool(result))
            },
            _ => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                Self::eval_binary(op, &lhs, &rhs, location)
            },
        }
    }

    /// Applies a strict binary operator to two evaluated values.
    ///
    /// Arithmetic and relational operators take integers; equality takes any
    /// two values of the same type. Logical operators are accepted too, for
    /// callers that already hold both values.
    ///
    /// ## Errors
    /// - `RuntimeError::DivisionByZero` and `RuntimeError::Overflow` from
    ///   integer arithmetic.
    /// - `RuntimeError::InvalidOperands` when the values do not fit the
    ///   operator.
    ///
    /// ## Example
    /// ```
    /// use azhar::{
    ///     ast::{BinaryOperator, Location},
    ///     interpreter::{evaluator::core::Interpreter, value::Value},
    /// };
    ///
    /// type Console = Interpreter<&'static [u8], Vec<u8>>;
    /// let at = Location::new(1, 1);
    ///
    /// let v = Console::eval_binary(BinaryOperator::Div, &Value::Integer(-7), &Value::Integer(2), at);
    /// assert_eq!(v.unwrap(), Value::Integer(-4));
    ///
    /// let v = Console::eval_binary(BinaryOperator::Equal,
    ///                              &Value::Str("a".into()),
    ///                              &Value::Str("a".into()),
    ///                              at);
    /// assert_eq!(v.unwrap(), Value::Bool(true));
    ///
    /// let v = Console::eval_binary(BinaryOperator::Add, &Value::Integer(1), &Value::Bool(true), at);
    /// assert!(v.is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       lhs: &Value,
                       rhs: &Value,
                       location: Location)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Sub,
        };

        match (op, lhs, rhs) {
            (Add, Value::Integer(a), Value::Integer(b)) => {
                Ok(Value::Integer(add_checked(*a, *b, location)?))
            },
            (Sub, Value::Integer(a), Value::Integer(b)) => {
                Ok(Value::Integer(sub_checked(*a, *b, location)?))
            },
            (Mul, Value::Integer(a), Value::Integer(b)) => {
                Ok(Value::Integer(mul_checked(*a, *b, location)?))
            },
            (Div, Value::Integer(a), Value::Integer(b)) => {
                Ok(Value::Integer(floor_div_checked(*a, *b, location)?))
            },
            (Less, Value::Integer(a), Value::Integer(b)) => Ok(Value::Bool(a < b)),
            (Greater, Value::Integer(a), Value::Integer(b)) => Ok(Value::Bool(a > b)),
            (LessEqual, Value::Integer(a), Value::Integer(b)) => Ok(Value::Bool(a <= b)),
            (GreaterEqual, Value::Integer(a), Value::Integer(b)) => Ok(Value::Bool(a >= b)),
            (Equal, a, b) if a.ty() == b.ty() => Ok(Value::Bool(a == b)),
            (NotEqual, a, b) if a.ty() == b.ty() => Ok(Value::Bool(a != b)),
            (And, a, b) => Ok(Value::Bool(a.is_truthy() && b.is_truthy())),
            (Or, a, b) => Ok(Value::Bool(a.is_truthy() || b.is_truthy())),
            _ => Err(RuntimeError::InvalidOperands { op: op.to_string(),
                                                     operands: format!("{} and {}",
                                                                       lhs.repr(),
                                                                       rhs.repr()),
                                                     location }),
        }
    }
}
