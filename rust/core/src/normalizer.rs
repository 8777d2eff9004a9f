// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bracket expression normalization
//!
//! INP values may carry inline arithmetic such as `ELEC-INPUT-RATIO = {1/3.2}`.
//! Those are evaluated here with a small arithmetic grammar built with nom:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := number | '(' expr ')' | '-' factor
//! ```
//!
//! Anything else inside the braces (parameter references, function calls)
//! is rejected and the line is left untouched by the segmenter.

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::fold_many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};
use std::borrow::Cow;

use crate::error::{Error, Result};

/// Decimal places for a closed `{expr}`
pub const EXPRESSION_PRECISION: usize = 3;

/// Decimal places for an unclosed trailing `{a/b` ratio
pub const RATIO_PRECISION: usize = 4;

/// Decimal literal: 12, 1.5, .25, 3.2E-2
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| fast_float::parse::<f64, _>(s),
    )(input)
}

fn factor(input: &str) -> IResult<&str, f64> {
    delimited(
        multispace0,
        alt((
            number,
            delimited(char('('), expr, preceded(multispace0, char(')'))),
            map(preceded(char('-'), factor), |v: f64| -v),
        )),
        multispace0,
    )(input)
}

fn term(input: &str) -> IResult<&str, f64> {
    let (input, first) = factor(input)?;
    fold_many0(
        pair(one_of("*/"), factor),
        move || first,
        |acc, (op, rhs)| if op == '*' { acc * rhs } else { acc / rhs },
    )(input)
}

fn expr(input: &str) -> IResult<&str, f64> {
    let (input, first) = term(input)?;
    fold_many0(
        pair(delimited(multispace0, one_of("+-"), multispace0), term),
        move || first,
        |acc, (op, rhs)| if op == '+' { acc + rhs } else { acc - rhs },
    )(input)
}

/// Format with a fixed number of decimals, rounding halves away from zero
pub fn to_fixed(value: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    format!("{:.*}", digits, (value * scale).round() / scale)
}

/// Evaluate an arithmetic expression limited to `+ - * / ( )` and decimals
pub fn evaluate(input: &str) -> Result<f64> {
    match all_consuming(expr)(input) {
        Ok((_, value)) if value.is_finite() => Ok(value),
        Ok(_) => Err(Error::Expression(format!(
            "'{}' does not evaluate to a finite number",
            input.trim()
        ))),
        Err(e) => Err(Error::Expression(format!(
            "unsupported expression '{}': {}",
            input.trim(),
            e
        ))),
    }
}

/// Replace every embedded `{expr}` in a line with its decimal value.
///
/// Text before, between and after the expressions is kept as written, so
/// list values and an inline `..` terminator survive. Lines without a
/// bracket expression come back borrowed and unchanged.
pub fn normalize_line(line: &str) -> Result<Cow<'_, str>> {
    if memchr::memchr(b'{', line.as_bytes()).is_none() {
        return Ok(Cow::Borrowed(line));
    }

    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) => {
                let value = evaluate(&after[..close])?;
                out.push_str(&to_fixed(value, EXPRESSION_PRECISION));
                rest = &after[close + 1..];
            }
            None => {
                // Unclosed brace: only a trailing `{a/b` ratio is accepted
                let (numerator, denominator) = parse_trailing_ratio(after)?;
                if denominator == 0.0 {
                    return Err(Error::Expression("division by zero".to_string()));
                }
                out.push_str(&to_fixed(numerator / denominator, RATIO_PRECISION));
                rest = "";
            }
        }
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn parse_trailing_ratio(input: &str) -> Result<(f64, f64)> {
    let parsed: IResult<&str, (f64, f64)> = all_consuming(delimited(
        multispace0,
        tuple((number, preceded(char('/'), number))),
        multispace0,
    ))(input);

    parsed
        .map(|(_, ratio)| ratio)
        .map_err(|_| Error::Expression(format!("unclosed expression '{{{}'", input.trim())))
}
