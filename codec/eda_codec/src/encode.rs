//! Shape encoder and canonical rendering.
//!
//! `encode` is the inverse of `decode`; `render` prints a token list in the
//! canonical text form `[0,0,"L",10,0]`: no whitespace, numbers in their
//! shortest round-trip form.

use eda_ir::{GeometryViolation, Shape, ShapeError, Tag, TokenKind, TokenList};
use serde_json::{Number, Value};

/// Encode a shape into its token array.
pub fn encode(shape: &Shape) -> Result<TokenList, ShapeError> {
    shape.validate()?;

    let mut kinds = Vec::new();
    match shape {
        Shape::Polygon(polygon) => {
            let start = polygon.start();
            kinds.extend([
                TokenKind::number(start.x),
                TokenKind::number(start.y),
                TokenKind::Tag(Tag::Line),
            ]);
            for vertex in polygon.vertices() {
                kinds.push(TokenKind::number(vertex.x));
                kinds.push(TokenKind::number(vertex.y));
            }
        }
        Shape::Rectangle(rect) => {
            let origin = rect.origin();
            kinds.extend([
                TokenKind::Tag(Tag::Rect),
                TokenKind::number(origin.x),
                TokenKind::number(origin.y),
                TokenKind::number(rect.width()),
                TokenKind::number(rect.height()),
                TokenKind::number(rect.rotation()),
                TokenKind::number(rect.corner_radius()),
            ]);
        }
        Shape::Circle(circle) => {
            let center = circle.center();
            kinds.extend([
                TokenKind::Tag(Tag::Circle),
                TokenKind::number(center.x),
                TokenKind::number(center.y),
                TokenKind::number(circle.radius()),
            ]);
        }
        Shape::Arc(arc) => {
            let (start, end) = (arc.start(), arc.end());
            kinds.extend([
                TokenKind::number(start.x),
                TokenKind::number(start.y),
                TokenKind::Tag(Tag::Arc),
                TokenKind::number(end.x),
                TokenKind::number(end.y),
                TokenKind::number(arc.rotation()),
            ]);
        }
        Shape::CenterArc(arc) => {
            let (start, end) = (arc.start(), arc.end());
            kinds.extend([
                TokenKind::number(start.x),
                TokenKind::number(start.y),
                TokenKind::Tag(Tag::CenterArc),
                TokenKind::number(arc.rotation()),
                TokenKind::number(end.x),
                TokenKind::number(end.y),
            ]);
        }
    }

    Ok(TokenList::from_kinds(kinds))
}

/// Render a token list as canonical text.
pub fn render(tokens: &TokenList) -> String {
    let mut out = String::from("[");
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match &token.kind {
            TokenKind::Number(bits) => out.push_str(&f64::from_bits(*bits).to_string()),
            TokenKind::Tag(tag) => {
                out.push('"');
                out.push_str(tag.as_str());
                out.push('"');
            }
            TokenKind::Unrecognized(text) => out.push_str(&Value::String(text.clone()).to_string()),
        }
    }
    out.push(']');
    out
}

/// Convert a token list into a JSON array.
pub fn tokens_to_json(tokens: &TokenList) -> Result<Value, ShapeError> {
    tokens
        .iter()
        .enumerate()
        .map(|(offset, token)| match &token.kind {
            TokenKind::Number(bits) => Number::from_f64(f64::from_bits(*bits))
                .map(Value::Number)
                .ok_or_else(|| {
                    ShapeError::invalid_geometry(GeometryViolation::NonFinite { field: "token" })
                        .at(offset, token.span)
                }),
            TokenKind::Tag(tag) => Ok(Value::String(tag.as_str().to_string())),
            TokenKind::Unrecognized(text) => Ok(Value::String(text.clone())),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Encode straight to canonical text.
pub fn encode_to_string(shape: &Shape) -> Result<String, ShapeError> {
    encode(shape).map(|tokens| render(&tokens))
}

/// Encode straight to a JSON array, as embedded in EasyEDA payloads.
pub fn encode_to_json(shape: &Shape) -> Result<Value, ShapeError> {
    tokens_to_json(&encode(shape)?)
}
