//! JSON serialization of parsed statements.
//!
//! Each statement becomes an object tagged `"constant_declaration"` (with
//! `name` and `value`) or `"value"` (with `value`); arrays serialize as
//! JSON arrays and integers as JSON numbers. This is the boundary format —
//! the parsing core never touches JSON.

use serde_json::json;

use crate::ast::{Statement, Value};

/// Convert a value to its JSON representation
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Integer(n) => json!(n),
        Value::Array(elements) => {
            serde_json::Value::Array(elements.iter().map(value_to_json).collect())
        }
    }
}

/// Convert one statement to its tagged JSON record
pub fn statement_to_json(statement: &Statement) -> serde_json::Value {
    match statement {
        Statement::ConstantDeclaration { name, value } => json!({
            "type": "constant_declaration",
            "name": name,
            "value": value_to_json(value),
        }),
        Statement::Value { value } => json!({
            "type": "value",
            "value": value_to_json(value),
        }),
    }
}

/// Convert a parsed program to a JSON array of statement records,
/// in input order
pub fn statements_to_json(statements: &[Statement]) -> serde_json::Value {
    serde_json::Value::Array(statements.iter().map(statement_to_json).collect())
}
