// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Float and integer grammars as defined in RFC 5545 Section 3.3.7 and 3.3.8.

use chumsky::Parser;
use chumsky::extra::ParserExtra;
use chumsky::label::LabelError;
use chumsky::prelude::*;

use crate::value::miscellaneous::{ValueExpected, digits, sign};

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// float      = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
pub fn value_float<'src, I, E>() -> impl Parser<'src, I, f64, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    let fractional_part = just('.').ignore_then(digits());

    sign()
        .or_not()
        .then(digits())
        .then(fractional_part.or_not())
        .try_map_with(|((sign, int_part), frac_part), e| {
            let capacity = sign.map_or(0, |_| 1)
                + int_part.len()
                + frac_part.as_ref().map_or(0, |f| 1 + f.len());

            let mut s = String::with_capacity(capacity);
            if let Some(sign) = sign {
                s.push(sign);
            }
            s.push_str(&int_part);
            if let Some(frac) = frac_part {
                s.push('.');
                s.push_str(&frac);
            }

            match lexical::parse_partial::<f64, _>(&s) {
                Ok((f, n)) if n == s.len() && f.is_finite() => Ok(f),
                _ => Err(E::Error::expected_found([ValueExpected::F64], None, e.span())),
            }
        })
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// integer    = (["+"] / "-") 1*DIGIT
/// ```
pub fn value_integer<'src, I, E>() -> impl Parser<'src, I, i32, E> + Clone
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    sign()
        .or_not()
        .then(digits())
        .try_map_with(|(sign, digits), e| {
            let capacity = sign.map_or(0, |_| 1) + digits.len();
            let mut int_str = String::with_capacity(capacity);
            if let Some(s) = sign {
                int_str.push(s);
            }
            int_str.push_str(&digits);

            match lexical::parse_partial::<i32, _>(&int_str) {
                Ok((v, n)) if n == int_str.len() => Ok(v),
                _ => Err(E::Error::expected_found([ValueExpected::I32], None, e.span())),
            }
        })
}

/// Format a float with at most `fraction_digits` digits after the point,
/// trimming trailing zeros (`12.340000` becomes `12.34`, `3.0` becomes `3`).
#[must_use]
pub fn format_float(value: f64, fraction_digits: usize) -> String {
    let mut s = format!("{value:.fraction_digits$}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}
