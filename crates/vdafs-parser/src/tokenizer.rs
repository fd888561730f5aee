// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parameter-field tokenization
//!
//! Splits a statement's parameter tail on commas and classifies each field
//! lexically: entity references keep their name, numeric fields become
//! numbers, everything else stays opaque text.

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::digit1,
    combinator::{all_consuming, recognize},
    sequence::pair,
    IResult, Parser,
};
use vdafs_model::Token;

/// Parse an entity reference: two uppercase letters followed by digits
fn reference(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while_m_n(2, 2, |c: char| c.is_ascii_uppercase()),
        digit1,
    ))
    .parse(input)
}

/// Classify a single trimmed, non-empty parameter field
///
/// References like `SR85` or `CV57` stay strings; integer parse is
/// attempted before float so plain counts avoid the float path, though both
/// fold into `Token::Number`.
pub fn classify_field(field: &str) -> Token {
    if all_consuming(reference).parse(field).is_ok() {
        return Token::Reference(field.to_string());
    }
    if let Ok(i) = lexical_core::parse::<i64>(field.as_bytes()) {
        return Token::Number(i as f64);
    }
    if let Ok(f) = lexical_core::parse::<f64>(field.as_bytes()) {
        return Token::Number(f);
    }
    Token::Text(field.to_string())
}

/// Tokenize a statement's parameter tail
///
/// Splits on commas, trims whitespace, drops empty fields.
pub fn tokenize_params(tail: &str) -> Vec<Token> {
    tail.split(',')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(classify_field)
        .collect()
}
