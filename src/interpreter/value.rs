use std::fmt;

use crate::ast::{LiteralValue, Type};

/// Represents a runtime value in the interpreter.
///
/// Values are plain data: integers, strings and booleans, plus `Void` as the
/// result of calls that finish without returning a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A string.
    Str(String),
    /// A boolean.
    Bool(bool),
    /// The absence of a value.
    Void,
}

impl Value {
    /// The type of the value.
    #[must_use]
    pub const fn ty(&self) -> Type {
        match self {
            Self::Integer(_) => Type::Int,
            Self::Str(_) => Type::String,
            Self::Bool(_) => Type::Bool,
            Self::Void => Type::Void,
        }
    }

    /// Coerces the value to a boolean.
    ///
    /// Non-zero integers and non-empty strings are truthy; `void` is not.
    ///
    /// ## Example
    /// ```
    /// use azhar::interpreter::value::Value;
    ///
    /// assert!(Value::Integer(-1).is_truthy());
    /// assert!(!Value::Str(String::new()).is_truthy());
    /// assert!(!Value::Void.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Integer(n) => *n != 0,
            Self::Str(s) => !s.is_empty(),
            Self::Bool(b) => *b,
            Self::Void => false,
        }
    }

    /// Renders the value for diagnostics, quoting strings.
    ///
    /// ## Example
    /// ```
    /// use azhar::interpreter::value::Value;
    ///
    /// assert_eq!(Value::Str("a b".to_string()).repr(), "\"a b\"");
    /// assert_eq!(Value::Integer(7).repr(), "7");
    /// ```
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Str(s) => format!("{s:?}"),
            other => other.to_string(),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Integer(*n),
            LiteralValue::Str(s) => Self::Str(s.clone()),
            LiteralValue::Bool(b) => Self::Bool(*b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Void => write!(f, "void"),
        }
    }
}
