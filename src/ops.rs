//! Built-in operator registry for expression calls.
//!
//! All operators are binary over 64-bit integers and are looked up by the
//! symbol used in `$( ... )` calls. Arithmetic is checked: overflow and
//! `mod` by zero are reported as evaluation errors rather than wrapping or
//! panicking.
//!
//! To add a new operator, implement a `fn(NumberType, NumberType) ->
//! Result<NumberType, Error>` and add it to `BUILTIN_OPS`.

use crate::Error;
use crate::ast::NumberType;

/// Definition of a built-in expression operator
pub struct BuiltinOp {
    /// Symbol used in `$( ... )` calls
    pub symbol: &'static str,
    func: fn(NumberType, NumberType) -> Result<NumberType, Error>,
}

impl BuiltinOp {
    /// Apply the operator to two resolved integer operands
    pub fn apply(&self, a: NumberType, b: NumberType) -> Result<NumberType, Error> {
        (self.func)(a, b)
    }
}

fn op_add(a: NumberType, b: NumberType) -> Result<NumberType, Error> {
    a.checked_add(b)
        .ok_or_else(|| Error::EvalError(format!("Integer overflow in + operation: {a} + {b}")))
}

fn op_sub(a: NumberType, b: NumberType) -> Result<NumberType, Error> {
    a.checked_sub(b)
        .ok_or_else(|| Error::EvalError(format!("Integer overflow in - operation: {a} - {b}")))
}

fn op_mul(a: NumberType, b: NumberType) -> Result<NumberType, Error> {
    a.checked_mul(b)
        .ok_or_else(|| Error::EvalError(format!("Integer overflow in * operation: {a} * {b}")))
}

/// Truncating remainder: the result takes the sign of the dividend
fn op_mod(a: NumberType, b: NumberType) -> Result<NumberType, Error> {
    if b == 0 {
        return Err(Error::EvalError(
            "Division by zero in mod operation".to_owned(),
        ));
    }
    // checked_rem still fails for NumberType::MIN mod -1
    a.checked_rem(b)
        .ok_or_else(|| Error::EvalError(format!("Integer overflow in mod operation: {a} mod {b}")))
}

/// Registry of all built-in operators
static BUILTIN_OPS: [BuiltinOp; 4] = [
    BuiltinOp {
        symbol: "+",
        func: op_add,
    },
    BuiltinOp {
        symbol: "-",
        func: op_sub,
    },
    BuiltinOp {
        symbol: "*",
        func: op_mul,
    },
    BuiltinOp {
        symbol: "mod",
        func: op_mod,
    },
];

/// Look up an operator by the symbol used in expression calls
pub fn find_op(symbol: &str) -> Option<&'static BuiltinOp> {
    BUILTIN_OPS.iter().find(|op| op.symbol == symbol)
}
