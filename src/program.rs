//! Line classification and the fail-fast program driver.
//!
//! Each raw input line is either skipped (blank or comment), a constant
//! declaration (`<value> -> NAME`), or a bare value statement. The driver
//! threads one fresh [`Environment`] through the whole run and aborts on
//! the first error, tagging it with the 1-based source line; the partial
//! result is discarded.

use std::fmt;

use crate::Error;
use crate::ast::{Statement, is_valid_constant_name};
use crate::evaluator::{self, Environment};
use crate::reader;

/// Comment lines start with this marker
pub const COMMENT_MARKER: &str = "//";

/// Separates the value expression from the constant name in declarations
pub const DECLARATION_SEPARATOR: &str = "->";

/// An [`Error`] tagged with the 1-based source line it was raised on
#[derive(Debug, Clone, PartialEq)]
pub struct LineError {
    pub line: usize,
    pub error: Error,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.error)
    }
}

impl std::error::Error for LineError {}

/// Classify and evaluate one raw input line.
///
/// Blank lines and comments produce no statement. Declarations update the
/// environment in place.
pub fn parse_line(line: &str, env: &mut Environment) -> Result<Option<Statement>, Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }

    if let Some((value_text, name)) = line.split_once(DECLARATION_SEPARATOR) {
        let name = name.trim();
        if !is_valid_constant_name(name) {
            return Err(Error::ParseError(format!("Invalid constant name: {name}")));
        }
        let expr = reader::read_value(value_text)?;
        let value = evaluator::eval(&expr, env)?;
        env.define(name.to_owned(), value.clone())?;
        return Ok(Some(Statement::ConstantDeclaration {
            name: name.to_owned(),
            value,
        }));
    }

    let expr = reader::read_value(line)?;
    let value = evaluator::eval(&expr, env)?;
    Ok(Some(Statement::Value { value }))
}

/// Parse a whole program: one statement per non-blank, non-comment line,
/// in input order.
///
/// The first error aborts the run; accumulated statements are discarded
/// and only the line-tagged error is surfaced.
pub fn parse_program(input: &str) -> Result<Vec<Statement>, LineError> {
    let mut env = Environment::new();
    let mut statements = Vec::new();

    for (index, raw_line) in input.lines().enumerate() {
        match parse_line(raw_line, &mut env) {
            Ok(Some(statement)) => statements.push(statement),
            Ok(None) => {}
            Err(error) => {
                return Err(LineError {
                    line: index + 1,
                    error,
                });
            }
        }
    }
    Ok(statements)
}
