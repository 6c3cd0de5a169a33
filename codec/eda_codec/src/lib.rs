//! Decoder and encoder for EasyEDA shape arrays.
//!
//! ```text
//! text ──lex──▶ TokenList ──decode──▶ Shape
//! Shape ──encode──▶ TokenList ──render──▶ text
//! ```
//!
//! [`decode_path`] reads compound paths such as
//! `0,0,"L",10,0,"ARC",10,10,90` into one shape per segment.
//!
//! `decode(encode(s)) == s` for every shape `s`. All functions are pure and
//! can be called from any thread.

mod decode;
mod encode;

pub use decode::{decode, decode_path};
pub use encode::{encode, encode_to_json, encode_to_string, render, tokens_to_json};

pub use eda_ir::{
    Arc, Arity, CenterArc, Circle, GeometryViolation, NestedShapeError, Point, Polygon, Rectangle,
    Shape, ShapeError, ShapeErrorKind, ShapeKind, Span, Tag, Token, TokenKind, TokenList,
};

use serde_json::Value;

/// Lex and decode one shape array from text.
pub fn decode_str(source: &str) -> Result<Shape, ShapeError> {
    let tokens = eda_lexer::lex(source)?;
    decode(tokens.as_slice())
}

/// Decode one shape array from a parsed JSON value.
pub fn decode_json(value: &Value) -> Result<Shape, ShapeError> {
    let tokens = eda_lexer::tokens_from_json_value(value)?;
    decode(tokens.as_slice())
}

/// Lex and decode a compound path from text.
pub fn decode_path_str(source: &str) -> Result<Vec<Shape>, ShapeError> {
    let tokens = eda_lexer::lex(source)?;
    decode_path(tokens.as_slice())
}

/// Decode a compound path from a parsed JSON array.
pub fn decode_path_json(value: &Value) -> Result<Vec<Shape>, ShapeError> {
    let tokens = eda_lexer::tokens_from_json_value(value)?;
    decode_path(tokens.as_slice())
}

/// Decode every token list, stopping at the first failure.
pub fn decode_all(lists: &[TokenList]) -> Result<Vec<Shape>, NestedShapeError> {
    lists
        .iter()
        .enumerate()
        .map(|(index, tokens)| {
            decode(tokens.as_slice()).map_err(|error| NestedShapeError::inner(index, error))
        })
        .collect()
}

/// Lex and decode `[[...], [...]]` text.
pub fn decode_all_str(source: &str) -> Result<Vec<Shape>, NestedShapeError> {
    let lists = eda_lexer::lex_nested(source)?;
    decode_all(&lists)
}

/// Decode a JSON array of shape arrays.
pub fn decode_all_json(value: &Value) -> Result<Vec<Shape>, NestedShapeError> {
    let lists = eda_lexer::nested_from_json(value)?;
    decode_all(&lists)
}

/// Encode several shapes as canonical nested text.
pub fn encode_all_to_string(shapes: &[Shape]) -> Result<String, ShapeError> {
    let rendered = shapes
        .iter()
        .map(encode_to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[{}]", rendered.join(",")))
}
