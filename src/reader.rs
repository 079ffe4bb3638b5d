//! Lexical value reader: turns one trimmed line fragment into an [`Expr`].
//!
//! Dispatch order is first match wins: integer literal, array literal,
//! expression call, constant reference, then a parse error. Array interiors
//! are split on `.` with a running brace depth counter, so dots inside
//! nested `{ ... }` groups never act as top-level separators. A naive flat
//! split on `.` would break nested arrays.

use nom::{
    IResult, Parser,
    bytes::complete::take_while1,
    character::complete::{digit1, one_of},
    combinator::{all_consuming, opt, recognize},
    sequence::pair,
};

use crate::Error;
use crate::MAX_PARSE_DEPTH;
use crate::ast::{Expr, NumberType, Operand, is_valid_constant_name};

/// Recognize an optionally signed run of ASCII digits
fn integer_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(one_of("+-")), digit1)).parse(input)
}

/// Recognize a run of uppercase ASCII letters
fn constant_token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_uppercase()).parse(input)
}

/// Read one text fragment into an [`Expr`].
///
/// The fragment is trimmed before dispatch; it must be consumed entirely by
/// exactly one of the value forms.
pub fn read_value(fragment: &str) -> Result<Expr, Error> {
    read_value_at_depth(fragment, 0)
}

fn read_value_at_depth(fragment: &str, depth: usize) -> Result<Expr, Error> {
    if depth >= MAX_PARSE_DEPTH {
        return Err(Error::ParseError(format!(
            "Value too deeply nested (max depth: {MAX_PARSE_DEPTH})"
        )));
    }
    let fragment = fragment.trim();

    if all_consuming(integer_literal).parse(fragment).is_ok() {
        // The fragment has integer form, so a parse failure can only be
        // an out-of-range literal.
        let n = fragment.parse::<NumberType>().map_err(|_| {
            Error::ParseError(format!("Integer literal out of range: {fragment}"))
        })?;
        return Ok(Expr::Integer(n));
    }

    if let Some(interior) = fragment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
        return read_array(interior, depth);
    }

    if let Some(interior) = fragment.strip_prefix("$(").and_then(|rest| rest.strip_suffix(')')) {
        return read_call(interior.trim());
    }

    if all_consuming(constant_token).parse(fragment).is_ok() {
        return Ok(Expr::Constant(fragment.to_owned()));
    }

    Err(Error::ParseError(format!("Invalid value format: {fragment}")))
}

/// Read an array interior: a dot-terminated element sequence
fn read_array(interior: &str, depth: usize) -> Result<Expr, Error> {
    let mut elements = Vec::new();
    for piece in split_elements(interior)? {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        elements.push(read_value_at_depth(piece, depth + 1)?);
    }
    Ok(Expr::Array(elements))
}

/// Split an array interior on top-level dots only.
///
/// Brace depth is tracked while scanning left to right; a `.` is a
/// separator only when the depth is zero at that point.
fn split_elements(interior: &str) -> Result<Vec<&str>, Error> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (offset, ch) in interior.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::ParseError(format!("Unbalanced braces in array: {interior}"))
                })?;
            }
            '.' if depth == 0 => {
                pieces.push(&interior[start..offset]);
                start = offset + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(Error::ParseError(format!(
            "Unbalanced braces in array: {interior}"
        )));
    }
    pieces.push(&interior[start..]);
    Ok(pieces)
}

/// Read a `$( ... )` interior: exactly `operator operand operand`
fn read_call(interior: &str) -> Result<Expr, Error> {
    let mut tokens = interior.split_whitespace();
    let Some(operator) = tokens.next() else {
        return Err(Error::ParseError("Empty expression".to_owned()));
    };
    let operands: Vec<&str> = tokens.collect();
    if operands.len() != 2 {
        return Err(Error::ArityError {
            expected: 2,
            got: operands.len(),
        });
    }
    let first = read_operand(operands[0])?;
    let second = read_operand(operands[1])?;
    Ok(Expr::Call {
        operator: operator.to_owned(),
        operands: [first, second],
    })
}

/// Classify one operand token as a constant name or an integer literal
fn read_operand(token: &str) -> Result<Operand, Error> {
    if is_valid_constant_name(token) {
        return Ok(Operand::Constant(token.to_owned()));
    }
    token
        .parse::<NumberType>()
        .map(Operand::Literal)
        .map_err(|_| Error::ParseError(format!("Invalid operand: {token}")))
}

#[cfg(test)]
#[expect(clippy::unwrap_used)] // test code OK
mod tests {
    use super::*;

    /// Test result variants for reader test cases
    #[derive(Debug)]
    enum ReadTestResult {
        Success(Expr),                // Reading should succeed with this expression
        SpecificError(&'static str),  // Reading should fail with an error containing this string
        Error,                        // Reading should fail (any error)
    }
    use ReadTestResult::*;

    fn int(n: NumberType) -> Expr {
        Expr::Integer(n)
    }

    fn arr(elements: Vec<Expr>) -> Expr {
        Expr::Array(elements)
    }

    fn constant(name: &str) -> Expr {
        Expr::Constant(name.to_owned())
    }

    fn call(operator: &str, first: Operand, second: Operand) -> Expr {
        Expr::Call {
            operator: operator.to_owned(),
            operands: [first, second],
        }
    }

    fn run_read_tests(test_cases: Vec<(&str, ReadTestResult)>) {
        for (i, (input, expected)) in test_cases.iter().enumerate() {
            let test_id = format!("Read test #{}", i + 1);
            let result = read_value(input);

            match (result, expected) {
                (Ok(actual), Success(expected_expr)) => {
                    assert_eq!(&actual, expected_expr, "{test_id}: mismatch for '{input}'");
                }
                (Err(_), Error) => {}
                (Err(err), SpecificError(expected_text)) => {
                    let message = format!("{err}");
                    assert!(
                        message.contains(expected_text),
                        "{test_id}: error '{message}' should contain '{expected_text}'"
                    );
                }
                (Ok(actual), Error | SpecificError(_)) => {
                    panic!("{test_id}: expected error for '{input}', got {actual:?}");
                }
                (Err(err), Success(_)) => {
                    panic!("{test_id}: expected success for '{input}', got error: {err}");
                }
            }
        }
    }

    #[test]
    fn test_reader_comprehensive() {
        let test_cases = vec![
            // ===== INTEGER LITERALS =====
            ("42", Success(int(42))),
            ("-5", Success(int(-5))),
            ("+7", Success(int(7))),
            ("0", Success(int(0))),
            ("-0", Success(int(0))),
            ("  42  ", Success(int(42))),
            ("9223372036854775807", Success(int(NumberType::MAX))),
            ("-9223372036854775808", Success(int(NumberType::MIN))),
            ("99999999999999999999", SpecificError("out of range")),
            ("-99999999999999999999", SpecificError("out of range")),
            ("3.14", SpecificError("Invalid value format: 3.14")),
            ("12abc", SpecificError("Invalid value format")),
            ("- 5", SpecificError("Invalid value format")),
            // ===== ARRAY LITERALS =====
            ("{}", Success(arr(vec![]))),
            ("{ }", Success(arr(vec![]))),
            ("{ 1. 2. 3. }", Success(arr(vec![int(1), int(2), int(3)]))),
            // Trailing separator on the last element is optional
            ("{ 1. 2. 3 }", Success(arr(vec![int(1), int(2), int(3)]))),
            // Empty pieces between separators are dropped
            ("{1..2}", Success(arr(vec![int(1), int(2)]))),
            ("{ . }", Success(arr(vec![]))),
            // Nested braces must not be split on their interior dots
            (
                "{ 1. { 2. 3. }. 4. }",
                Success(arr(vec![int(1), arr(vec![int(2), int(3)]), int(4)])),
            ),
            (
                "{ { 1. }. { 2. } }",
                Success(arr(vec![arr(vec![int(1)]), arr(vec![int(2)])])),
            ),
            (
                "{ { { -1. }. }. }",
                Success(arr(vec![arr(vec![arr(vec![int(-1)])])])),
            ),
            // Constant references and calls as elements
            ("{ FOO. 2. }", Success(arr(vec![constant("FOO"), int(2)]))),
            (
                "{ $(+ 1 2). }",
                Success(arr(vec![call(
                    "+",
                    Operand::Literal(1),
                    Operand::Literal(2),
                )])),
            ),
            ("{ 1 2 }", SpecificError("Invalid value format: 1 2")),
            ("{ { 1. }", SpecificError("Unbalanced braces")),
            ("{ 1. } }", SpecificError("Unbalanced braces")),
            // ===== EXPRESSION CALLS =====
            (
                "$(+ 1 2)",
                Success(call("+", Operand::Literal(1), Operand::Literal(2))),
            ),
            (
                "$( + 1 2 )",
                Success(call("+", Operand::Literal(1), Operand::Literal(2))),
            ),
            (
                "$(mod Y 3)",
                Success(call(
                    "mod",
                    Operand::Constant("Y".to_owned()),
                    Operand::Literal(3),
                )),
            ),
            (
                "$(* X -2)",
                Success(call(
                    "*",
                    Operand::Constant("X".to_owned()),
                    Operand::Literal(-2),
                )),
            ),
            // Unknown operators are a resolution concern, not a read error
            (
                "$(invalid X Y)",
                Success(call(
                    "invalid",
                    Operand::Constant("X".to_owned()),
                    Operand::Constant("Y".to_owned()),
                )),
            ),
            ("$()", SpecificError("Empty expression")),
            ("$(   )", SpecificError("Empty expression")),
            ("$(+ 1)", SpecificError("Expression requires exactly 2 operands")),
            (
                "$(+ 1 2 3)",
                SpecificError("Expression requires exactly 2 operands"),
            ),
            ("$(+ 1 @)", SpecificError("Invalid operand: @")),
            ("$(+ x 2)", SpecificError("Invalid operand: x")),
            ("$(+ 1 2.5)", SpecificError("Invalid operand: 2.5")),
            // ===== CONSTANT REFERENCES =====
            ("FOO", Success(constant("FOO"))),
            ("X", Success(constant("X"))),
            ("Foo", SpecificError("Invalid value format: Foo")),
            ("FOO1", SpecificError("Invalid value format")),
            ("FOO_BAR", SpecificError("Invalid value format")),
            // ===== UNPARSEABLE FRAGMENTS =====
            ("", SpecificError("Invalid value format")),
            ("{", SpecificError("Invalid value format")),
            ("}", SpecificError("Invalid value format")),
            ("$(+ 1 2", SpecificError("Invalid value format")),
            ("1 2", Error),
            ("hello", Error),
        ];

        run_read_tests(test_cases);
    }

    #[test]
    fn test_reader_depth_limits() {
        fn nested_array(levels: usize) -> String {
            let mut text = String::from("1");
            for _ in 0..levels {
                text = format!("{{ {text}. }}");
            }
            text
        }

        assert!(
            read_value(&nested_array(MAX_PARSE_DEPTH - 1)).is_ok(),
            "nesting just under the depth limit should read successfully"
        );

        let err = read_value(&nested_array(MAX_PARSE_DEPTH)).unwrap_err();
        assert!(format!("{err}").contains("too deeply nested"));
    }
}
