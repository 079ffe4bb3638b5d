//! dotcfg - strict line-oriented configuration language
//!
//! This crate translates a small configuration language into a structured
//! value tree. Every non-empty, non-comment input line is one statement:
//! either a bare value or a constant declaration of the form
//! `<value> -> NAME`.
//!
//! ```text
//! // Define base values
//! 10 -> BASE
//! { 1. 2. 3. } -> ARRAY
//! $(+ BASE 5) -> DERIVED
//! { ARRAY. $(* BASE 2). }
//! ```
//!
//! Values are 64-bit integers, dot-terminated arrays (`{ 1. 2. 3. }`,
//! nestable to arbitrary depth), prefix expression calls (`$(+ X 2)`) and
//! references to previously declared all-uppercase constants.
//!
//! ## Strict semantics
//!
//! The language is deliberately strict:
//! - Constants must be declared on an earlier line than any reference to
//!   them: no forward references, no redefinition.
//! - Expression calls take exactly one operator and two integer operands;
//!   calls do not nest.
//! - Arithmetic overflow and `mod` by zero are reported as errors, never
//!   wrapped or panicked on.
//! - The first error aborts the whole run with a 1-based line diagnostic
//!   and no partial output.
//!
//! ## Modules
//!
//! - `reader`: lexical value reader, text fragment to syntax tree
//! - `evaluator`: constant environment and syntax-tree evaluation
//! - `ops`: built-in operator registry for expression calls
//! - `program`: line classification and the fail-fast program driver
//! - `json`: JSON serialization of parsed statements (feature `json`)

use std::fmt;

/// Maximum array nesting depth accepted by the reader.
/// Limits recursion so deeply nested input cannot overflow the stack.
pub const MAX_PARSE_DEPTH: usize = 32;

/// Error types for the parser and evaluator
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed literal, invalid constant name, unknown operator or
    /// otherwise unparseable fragment
    ParseError(String),
    /// Domain error raised while evaluating (mod by zero, integer
    /// overflow, constant redeclaration)
    EvalError(String),
    /// An expression operand resolved to a non-integer value
    TypeError(String),
    /// Reference to a constant that has not been declared yet
    UndefinedConstant(String),
    /// Expression call with the wrong number of operands
    ArityError { expected: usize, got: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ParseError(msg) | Error::EvalError(msg) | Error::TypeError(msg) => {
                write!(f, "{msg}")
            }
            Error::UndefinedConstant(name) => write!(f, "Undefined constant: {name}"),
            Error::ArityError { expected, got } => {
                write!(f, "Expression requires exactly {expected} operands, got {got}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub mod ast;
pub mod evaluator;
pub mod ops;
pub mod program;
pub mod reader;

#[cfg(feature = "json")]
pub mod json;
