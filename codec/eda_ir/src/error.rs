//! Error types shared by the reader, decoder and encoder.
//!
//! Every error carries:
//! - `kind`: which rule failed
//! - `offset`: index of the offending token in the array
//! - `span`: byte range in the source text (`Span::DUMMY` when the tokens
//!   did not come from text)

use crate::{ShapeKind, Span};
use std::fmt;

/// A codec error with its location.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind} (at token {offset})")]
pub struct ShapeError {
    pub kind: ShapeErrorKind,
    pub offset: usize,
    pub span: Span,
}

/// Error from reading or decoding a list of shape arrays.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{}", nested_message(.index, .error))]
pub struct NestedShapeError {
    /// Index of the inner array that failed; `None` when the outer list
    /// itself could not be read.
    pub index: Option<usize>,
    #[source]
    pub error: ShapeError,
}

fn nested_message(index: &Option<usize>, error: &ShapeError) -> String {
    match index {
        Some(index) => format!("shape {index}: {error}"),
        None => error.to_string(),
    }
}

impl NestedShapeError {
    /// A fault inside inner array `index`.
    pub fn inner(index: usize, error: ShapeError) -> Self {
        NestedShapeError {
            index: Some(index),
            error,
        }
    }

    /// A fault in the outer list, or a single array read on its own.
    pub fn outer(error: ShapeError) -> Self {
        NestedShapeError { index: None, error }
    }
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ShapeErrorKind {
    /// An element is neither a number nor a quoted string.
    #[error("malformed token `{text}`: expected a number or a quoted tag")]
    MalformedToken { text: String },

    /// Wrong number of numeric tokens after the tag of the matched shape.
    ///
    /// `found` counts the numeric tokens read before the stream ended or a
    /// non-numeric token appeared.
    #[error("{shape} expects {expected} numeric tokens, found {found}")]
    ArityError {
        shape: ShapeKind,
        expected: Arity,
        found: usize,
    },

    /// No recognised discriminator where one is required.
    ///
    /// `found` is `None` when the stream is too short to hold one.
    #[error("{}", unknown_tag_message(.found))]
    UnknownShapeTag { found: Option<String> },

    /// A shape invariant does not hold.
    #[error("invalid geometry: {violation}")]
    InvalidGeometry { violation: GeometryViolation },
}

fn unknown_tag_message(found: &Option<String>) -> String {
    match found {
        Some(found) => format!("unknown shape tag: found {found}"),
        None => "unknown shape tag: token array too short to contain a discriminator".to_string(),
    }
}

/// Expected count of numeric tokens for an arity check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Arity {
    Exactly(usize),
    /// Any even count (polygon vertex pairs).
    Even,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::Even => write!(f, "an even number of"),
        }
    }
}

/// Which shape invariant was violated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum GeometryViolation {
    #[error("polygon has no start point")]
    EmptyPolygon,
    #[error("circle radius must be greater than zero")]
    NonPositiveRadius,
    #[error("rectangle corner radius must not be negative")]
    NegativeCornerRadius,
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}

impl ShapeError {
    pub fn new(kind: ShapeErrorKind, offset: usize, span: Span) -> Self {
        ShapeError { kind, offset, span }
    }

    pub fn malformed_token(text: impl Into<String>, offset: usize, span: Span) -> Self {
        Self::new(
            ShapeErrorKind::MalformedToken { text: text.into() },
            offset,
            span,
        )
    }

    pub fn arity(shape: ShapeKind, expected: Arity, found: usize, offset: usize, span: Span) -> Self {
        Self::new(
            ShapeErrorKind::ArityError {
                shape,
                expected,
                found,
            },
            offset,
            span,
        )
    }

    pub fn unknown_tag(found: Option<String>, offset: usize, span: Span) -> Self {
        Self::new(ShapeErrorKind::UnknownShapeTag { found }, offset, span)
    }

    /// A violated invariant, not yet tied to a token.
    pub fn invalid_geometry(violation: GeometryViolation) -> Self {
        Self::new(
            ShapeErrorKind::InvalidGeometry { violation },
            0,
            Span::DUMMY,
        )
    }

    /// Re-locate this error at `offset`/`span`.
    #[must_use]
    pub fn at(mut self, offset: usize, span: Span) -> Self {
        self.offset = offset;
        self.span = span;
        self
    }

    /// Stable error code for searchability.
    pub fn code(&self) -> &'static str {
        match self.kind {
            ShapeErrorKind::MalformedToken { .. } => "S0001",
            ShapeErrorKind::ArityError { .. } => "S0002",
            ShapeErrorKind::UnknownShapeTag { .. } => "S0003",
            ShapeErrorKind::InvalidGeometry { .. } => "S0004",
        }
    }

    pub fn is_malformed_token(&self) -> bool {
        matches!(self.kind, ShapeErrorKind::MalformedToken { .. })
    }

    pub fn is_arity_error(&self) -> bool {
        matches!(self.kind, ShapeErrorKind::ArityError { .. })
    }

    pub fn is_unknown_shape_tag(&self) -> bool {
        matches!(self.kind, ShapeErrorKind::UnknownShapeTag { .. })
    }

    pub fn is_invalid_geometry(&self) -> bool {
        matches!(self.kind, ShapeErrorKind::InvalidGeometry { .. })
    }
}
