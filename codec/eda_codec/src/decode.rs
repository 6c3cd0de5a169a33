//! Shape decoder.
//!
//! Dispatch is a single ordered match: position 0 is checked for the
//! tag-first forms (`"R"`, `"CIRCLE"`) before falling back to the
//! start-point forms, which carry their tag at position 2.
//!
//! ```text
//! "R", x, y, w, h, rot, r        Rectangle
//! "CIRCLE", x, y, r              Circle
//! x, y, "L", x1, y1, ...         Polygon
//! x, y, "ARC", ex, ey, rot       Arc
//! x, y, "CARC", rot, ex, ey      CenterArc
//! ```

use eda_ir::{
    Arc, Arity, CenterArc, Circle, GeometryViolation, Point, Polygon, Rectangle, Shape,
    ShapeError, ShapeErrorKind, ShapeKind, Span, Tag, Token, TokenKind,
};
use tracing::{debug, trace};

/// Decode one token array into a shape.
pub fn decode(tokens: &[Token]) -> Result<Shape, ShapeError> {
    let shape = match tokens.first().map(|t| &t.kind) {
        Some(TokenKind::Tag(Tag::Rect)) => {
            trace!("decode -> Rectangle");
            decode_rectangle(tokens, 0)?
        }
        Some(TokenKind::Tag(Tag::Circle)) => {
            trace!("decode -> Circle");
            decode_circle(tokens, 0)?
        }
        _ => {
            let start = start_point(tokens)?;
            decode_segment(tokens, 2, start)?
        }
    };

    debug!(kind = %shape.kind(), tokens = tokens.len(), "decoded shape");
    Ok(shape)
}

/// Decode a compound path into its segments.
///
/// A path opens with a start point or a closed `"R"`/`"CIRCLE"` shape, then
/// chains commands: each `"L"`, `"ARC"` or `"CARC"` begins where the
/// previous segment ended.
///
/// ```text
/// 0, 0, "L", 10, 0, "ARC", 10, 10, 90, "CARC", 45, 0, 10
/// ```
///
/// A closed shape leaves no end point, so a line or arc directly after it
/// is an `UnknownShapeTag`. Every segment obeys the same arity and geometry
/// rules as [`decode`], and error offsets index the whole path.
pub fn decode_path(tokens: &[Token]) -> Result<Vec<Shape>, ShapeError> {
    let mut shapes = Vec::new();
    let mut pen = None;
    let mut at = 0;

    if tokens.first().is_some_and(|t| t.kind.as_number().is_some()) {
        pen = Some(start_point(tokens)?);
        at = 2;
    } else if tokens.is_empty() {
        return Err(ShapeError::unknown_tag(None, 0, Span::DUMMY));
    }

    while let Some(token) = tokens.get(at) {
        let end = segment_end(tokens, at);
        let segment = &tokens[..end];

        let shape = match (&token.kind, pen) {
            (TokenKind::Tag(Tag::Rect), _) => {
                trace!(at, "path -> Rectangle");
                decode_rectangle(segment, at)?
            }
            (TokenKind::Tag(Tag::Circle), _) => {
                trace!(at, "path -> Circle");
                decode_circle(segment, at)?
            }
            (TokenKind::Tag(Tag::Line | Tag::Arc | Tag::CenterArc), Some(start)) => {
                decode_segment(segment, at, start)?
            }
            (kind, _) => return Err(ShapeError::unknown_tag(Some(kind.describe()), at, token.span)),
        };

        pen = end_point(&shape);
        shapes.push(shape);
        at = end;
    }

    debug!(segments = shapes.len(), tokens = tokens.len(), "decoded path");
    Ok(shapes)
}

/// Index of the first non-numeric token after `at`, or the stream length.
fn segment_end(tokens: &[Token], at: usize) -> usize {
    at + 1 + numeric_run(&tokens[at + 1..])
}

/// Where the pen rests after drawing `shape`; closed shapes leave none.
fn end_point(shape: &Shape) -> Option<Point> {
    match shape {
        Shape::Polygon(polygon) => polygon.points().last().copied(),
        Shape::Arc(arc) => Some(arc.end()),
        Shape::CenterArc(arc) => Some(arc.end()),
        Shape::Rectangle(_) | Shape::Circle(_) => None,
    }
}

/// `tokens[tag_at]` is `"R"`; its six operands must end the slice.
fn decode_rectangle(tokens: &[Token], tag_at: usize) -> Result<Shape, ShapeError> {
    let n = expect_numbers(tokens, tag_at + 1, 6, ShapeKind::Rectangle)?;
    Rectangle::new(Point::new(n[0], n[1]), n[2], n[3], n[4], n[5])
        .map(Shape::Rectangle)
        .map_err(|e| locate_geometry(e, tokens, tag_at + 6))
}

fn decode_circle(tokens: &[Token], tag_at: usize) -> Result<Shape, ShapeError> {
    let n = expect_numbers(tokens, tag_at + 1, 3, ShapeKind::Circle)?;
    Circle::new(Point::new(n[0], n[1]), n[2])
        .map(Shape::Circle)
        .map_err(|e| locate_geometry(e, tokens, tag_at + 3))
}

/// Start point of the forms that carry their tag at position 2.
fn start_point(tokens: &[Token]) -> Result<Point, ShapeError> {
    for offset in 0..2 {
        match tokens.get(offset) {
            None => return Err(ShapeError::unknown_tag(None, offset, end_span(tokens))),
            Some(token) if token.kind.as_number().is_none() => {
                return Err(ShapeError::unknown_tag(
                    Some(token.kind.describe()),
                    offset,
                    token.span,
                ));
            }
            Some(_) => {}
        }
    }
    if tokens.len() < 3 {
        return Err(ShapeError::unknown_tag(None, 2, end_span(tokens)));
    }
    Ok(Point::new(number_at(tokens, 0), number_at(tokens, 1)))
}

/// A start-point segment: `tokens[tag_at]` is the discriminator and the
/// segment's operands run to the end of the slice.
fn decode_segment(tokens: &[Token], tag_at: usize, start: Point) -> Result<Shape, ShapeError> {
    let discriminator = &tokens[tag_at];
    match &discriminator.kind {
        TokenKind::Tag(Tag::Line) => {
            trace!("decode -> Polygon");
            decode_polygon(tokens, tag_at, start)
        }
        TokenKind::Tag(Tag::Arc) => {
            trace!("decode -> Arc");
            let n = expect_numbers(tokens, tag_at + 1, 3, ShapeKind::Arc)?;
            Arc::new(start, Point::new(n[0], n[1]), n[2])
                .map(Shape::Arc)
                .map_err(|e| locate_geometry(e, tokens, 0))
        }
        TokenKind::Tag(Tag::CenterArc) => {
            trace!("decode -> CenterArc");
            let n = expect_numbers(tokens, tag_at + 1, 3, ShapeKind::CenterArc)?;
            CenterArc::new(start, n[0], Point::new(n[1], n[2]))
                .map(Shape::CenterArc)
                .map_err(|e| locate_geometry(e, tokens, 0))
        }
        other => Err(ShapeError::unknown_tag(
            Some(other.describe()),
            tag_at,
            discriminator.span,
        )),
    }
}

fn decode_polygon(tokens: &[Token], tag_at: usize, start: Point) -> Result<Shape, ShapeError> {
    let rest = &tokens[tag_at + 1..];
    let run = numeric_run(rest);

    if run != rest.len() {
        let offset = tag_at + 1 + run;
        return Err(ShapeError::arity(
            ShapeKind::Polygon,
            Arity::Even,
            run,
            offset,
            tokens[offset].span,
        ));
    }
    if run % 2 != 0 {
        return Err(ShapeError::arity(
            ShapeKind::Polygon,
            Arity::Even,
            run,
            tokens.len(),
            end_span(tokens),
        ));
    }

    let vertices = rest
        .chunks_exact(2)
        .map(|pair| Point::new(number_of(&pair[0]), number_of(&pair[1])));
    Polygon::from_start(start, vertices)
        .map(Shape::Polygon)
        .map_err(|e| locate_geometry(e, tokens, 0))
}

/// Read exactly `expected` numbers starting at `from`, which must also be
/// the last tokens of the array.
fn expect_numbers(
    tokens: &[Token],
    from: usize,
    expected: usize,
    shape: ShapeKind,
) -> Result<Vec<f64>, ShapeError> {
    let rest = tokens.get(from..).unwrap_or_default();
    let run = numeric_run(rest);

    if run == expected && rest.len() == expected {
        return Ok(rest.iter().map(number_of).collect());
    }

    // Shortfall points at the first missing or non-numeric token,
    // excess at the first token past the expected count.
    let offset = from + run.min(expected);
    let span = tokens.get(offset).map_or_else(|| end_span(tokens), |t| t.span);
    Err(ShapeError::arity(
        shape,
        Arity::Exactly(expected),
        run,
        offset,
        span,
    ))
}

fn numeric_run(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .take_while(|t| t.kind.as_number().is_some())
        .count()
}

/// Value of a token already known to be numeric.
fn number_of(token: &Token) -> f64 {
    token.kind.as_number().unwrap_or(f64::NAN)
}

fn number_at(tokens: &[Token], offset: usize) -> f64 {
    tokens.get(offset).map_or(f64::NAN, number_of)
}

/// Empty span just past the last token.
fn end_span(tokens: &[Token]) -> Span {
    tokens.last().map_or(Span::DUMMY, |t| Span::point(t.span.end))
}

/// Point a geometry error at the token that broke the invariant.
///
/// Non-finite values point at the first non-finite number; range checks
/// point at `checked_offset`, the position of the range-checked field.
fn locate_geometry(error: ShapeError, tokens: &[Token], checked_offset: usize) -> ShapeError {
    let offset = match error.kind {
        ShapeErrorKind::InvalidGeometry {
            violation: GeometryViolation::NonFinite { .. },
        } => tokens
            .iter()
            .position(|t| t.kind.as_number().is_some_and(|n| !n.is_finite()))
            .unwrap_or(0),
        _ => checked_offset,
    };
    let span = tokens.get(offset).map_or(Span::DUMMY, |t| t.span);
    error.at(offset, span)
}

#[cfg(test)]
mod tests;
