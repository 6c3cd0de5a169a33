//! Shared types for the EasyEDA shape codec.
//!
//! - [`Span`]: byte ranges into the textual token array
//! - [`Token`], [`TokenKind`], [`TokenList`]: the flat number/tag stream
//! - [`Shape`] and its five variants: the decoded, validated model
//! - [`ShapeError`]: the error taxonomy shared by every stage, and
//!   [`NestedShapeError`] for lists of arrays
//!
//! All types are plain values; nothing here does I/O or holds shared state.

mod error;
mod shape;
mod span;
mod token;

pub use error::{Arity, GeometryViolation, NestedShapeError, ShapeError, ShapeErrorKind};
pub use shape::{Arc, CenterArc, Circle, Point, Polygon, Rectangle, Shape, ShapeKind};
pub use span::Span;
pub use token::{Tag, Token, TokenKind, TokenList};
