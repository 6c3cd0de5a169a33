//! Reading shape arrays that are already parsed JSON.
//!
//! EasyEDA payloads embed shapes as JSON arrays, so callers holding a
//! `serde_json::Value` can skip the text lexer. Tokens produced here carry
//! `Span::DUMMY`.

use eda_ir::{NestedShapeError, ShapeError, Span, Tag, Token, TokenKind, TokenList};
use serde_json::Value;

fn token_from_json(value: &Value, offset: usize) -> Result<Token, ShapeError> {
    let kind = match value {
        Value::Number(number) => match number.as_f64() {
            Some(n) => TokenKind::number(n),
            None => return Err(ShapeError::malformed_token(number.to_string(), offset, Span::DUMMY)),
        },
        Value::String(text) => match Tag::lookup(text) {
            Some(tag) => TokenKind::Tag(tag),
            None => TokenKind::Unrecognized(text.clone()),
        },
        other => return Err(ShapeError::malformed_token(other.to_string(), offset, Span::DUMMY)),
    };
    Ok(Token::dummy(kind))
}

/// Read the elements of one JSON shape array.
pub fn tokens_from_json(values: &[Value]) -> Result<TokenList, ShapeError> {
    values
        .iter()
        .enumerate()
        .map(|(offset, value)| token_from_json(value, offset))
        .collect()
}

/// Read a JSON value that must be a shape array.
pub fn tokens_from_json_value(value: &Value) -> Result<TokenList, ShapeError> {
    match value {
        Value::Array(values) => tokens_from_json(values),
        other => Err(ShapeError::malformed_token(other.to_string(), 0, Span::DUMMY)),
    }
}

/// Read a JSON array of shape arrays.
///
/// A non-array entry is an outer fault at that entry's index; a bad element
/// inside an entry names the entry.
pub fn nested_from_json(value: &Value) -> Result<Vec<TokenList>, NestedShapeError> {
    let Value::Array(entries) = value else {
        return Err(NestedShapeError::outer(ShapeError::malformed_token(
            value.to_string(),
            0,
            Span::DUMMY,
        )));
    };
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Array(values) => {
                tokens_from_json(values).map_err(|error| NestedShapeError::inner(index, error))
            }
            other => Err(NestedShapeError::outer(ShapeError::malformed_token(
                other.to_string(),
                index,
                Span::DUMMY,
            ))),
        })
        .collect()
}
