//! Core syntax tree and value types. The reader produces [`Expr`], the
//! syntactic form of one value fragment; the evaluator resolves it into a
//! [`Value`] against the constant environment. Keeping the two apart means
//! constant references and expression calls exist as data until the
//! environment is consulted, and a parsed fragment can be inspected or
//! evaluated against several independent environments.
//!
//! [`Value`] implements `Display` in re-parseable source form, so feeding a
//! rendered literal back through the reader reproduces the same value.

use std::fmt;

/// Type alias for integer values
pub type NumberType = i64;

/// A fully resolved configuration value
///
/// Values are immutable once constructed and acyclic by construction:
/// they are only ever built bottom-up from literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer
    Integer(NumberType),
    /// Ordered sequence of values, nestable to arbitrary depth
    Array(Vec<Value>),
}

/// Syntactic form of one value fragment, produced by the reader.
///
/// Constant references and expression calls are unresolved here; the
/// evaluator resolves them against the current environment.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(NumberType),
    Array(Vec<Expr>),
    /// A `$( operator operand operand )` expression call
    Call {
        operator: String,
        operands: [Operand; 2],
    },
    /// Reference to a previously declared constant
    Constant(String),
}

/// One operand of an expression call.
///
/// Operands are restricted to integer literals and constant names;
/// expression calls do not nest.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(NumberType),
    Constant(String),
}

/// One parsed statement, produced one-to-one with each non-blank,
/// non-comment input line, in input order.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    ConstantDeclaration { name: String, value: Value },
    Value { value: Value },
}

/// Check if a string is a valid constant name
/// Valid: non-empty, uppercase ASCII letters only
pub(crate) fn is_valid_constant_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase())
}

// From trait implementations for Value - enables .into() conversion

impl From<NumberType> for Value {
    fn from(n: NumberType) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(NumberType::from(n))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(|x| x.into()).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(arr: [T; N]) -> Self {
        Value::Array(arr.into_iter().map(|x| x.into()).collect())
    }
}

/// Helper function for creating Values - works great in mixed arrays!
/// Accepts any type that can be converted to Value
#[cfg_attr(not(test), expect(dead_code))]
pub(crate) fn val<T: Into<Value>>(value: T) -> Value {
    value.into()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Array(elements) => {
                write!(f, "{{")?;
                for element in elements {
                    write!(f, " {element}.")?;
                }
                write!(f, " }}")
            }
        }
    }
}
