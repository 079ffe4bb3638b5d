//! Constant environment and syntax-tree evaluation.
//!
//! [`eval`] resolves an [`Expr`] into a [`Value`] against an
//! [`Environment`]. Evaluation recursion is bounded by the reader's depth
//! limit, so no separate depth tracking is needed here.

use std::collections::HashMap;

use crate::Error;
use crate::ast::{Expr, NumberType, Operand, Value};
use crate::ops::find_op;

/// Insertion-ordered constant bindings for one parse run.
///
/// A fresh environment is created per run. Constants must be declared on an
/// earlier line than any reference to them and may not be redeclared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    order: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a binding. Redeclaring a name is an error.
    pub fn define(&mut self, name: String, value: Value) -> Result<(), Error> {
        if self.bindings.contains_key(&name) {
            return Err(Error::EvalError(format!(
                "Constant already declared: {name}"
            )));
        }
        self.order.push(name.clone());
        self.bindings.insert(name, value);
        Ok(())
    }

    /// Look up a binding, failing if the name has not been declared
    pub fn resolve(&self, name: &str) -> Result<&Value, Error> {
        self.bindings
            .get(name)
            .ok_or_else(|| Error::UndefinedConstant(name.to_owned()))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// All bindings in declaration order
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.order
            .iter()
            .filter_map(|name| self.bindings.get(name).map(|value| (name.as_str(), value)))
    }
}

/// Evaluate a syntax tree against the environment (public API)
pub fn eval(expr: &Expr, env: &Environment) -> Result<Value, Error> {
    match expr {
        Expr::Integer(n) => Ok(Value::Integer(*n)),

        // Constant lookup
        Expr::Constant(name) => env.resolve(name).cloned(),

        // Arrays evaluate element-wise, in order
        Expr::Array(elements) => {
            let values = elements
                .iter()
                .map(|element| eval(element, env))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(values))
        }

        // Operands resolve left to right before the operator is looked up,
        // so an undefined constant is reported ahead of an unknown operator
        Expr::Call { operator, operands } => {
            let a = resolve_operand(&operands[0], env)?;
            let b = resolve_operand(&operands[1], env)?;
            let op = find_op(operator)
                .ok_or_else(|| Error::ParseError(format!("Unknown operator: {operator}")))?;
            op.apply(a, b).map(Value::Integer)
        }
    }
}

/// Resolve one call operand to an integer.
///
/// Constants bound to arrays are rejected: operators are defined over
/// integers only.
fn resolve_operand(operand: &Operand, env: &Environment) -> Result<NumberType, Error> {
    match operand {
        Operand::Literal(n) => Ok(*n),
        Operand::Constant(name) => match env.resolve(name)? {
            Value::Integer(n) => Ok(*n),
            Value::Array(_) => Err(Error::TypeError(format!(
                "Operand {name} is an array, expected an integer"
            ))),
        },
    }
}
