//! Token types for the shape token array.
//!
//! A shape is written as a flat array mixing numbers and a handful of
//! literal tag strings, e.g. `[0, 0, "L", 10, 0]` or `["CIRCLE", 0, 0, 5]`.

use super::Span;
use std::fmt;
use std::ops::Index;

/// Literal tag strings recognised in a token array.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Tag {
    /// `"L"`: line-to vertices follow (polygon).
    Line,
    /// `"R"`: rectangle, tag-first.
    Rect,
    /// `"CIRCLE"`: circle, tag-first.
    Circle,
    /// `"ARC"`: arc given by end point and rotation.
    Arc,
    /// `"CARC"`: center arc given by rotation and end point.
    CenterArc,
}

impl Tag {
    pub const ALL: [Tag; 5] = [Tag::Line, Tag::Rect, Tag::Circle, Tag::Arc, Tag::CenterArc];

    /// The literal as it appears between quotes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Tag::Line => "L",
            Tag::Rect => "R",
            Tag::Circle => "CIRCLE",
            Tag::Arc => "ARC",
            Tag::CenterArc => "CARC",
        }
    }

    /// Look up a tag by its literal. Matching is exact and case-sensitive.
    pub fn lookup(literal: &str) -> Option<Tag> {
        match literal {
            "L" => Some(Tag::Line),
            "R" => Some(Tag::Rect),
            "CIRCLE" => Some(Tag::Circle),
            "ARC" => Some(Tag::Arc),
            "CARC" => Some(Tag::CenterArc),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_str())
    }
}

/// Token kinds.
///
/// Numbers store their bits as u64 so the kind stays `Eq + Hash`.
#[derive(Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Numeric element (bits of an `f64`).
    Number(u64),
    /// One of the recognised tag literals.
    Tag(Tag),
    /// A quoted string that is not a recognised tag.
    ///
    /// Kept as a token so the decoder can report it in discriminator
    /// position as an unknown shape tag.
    Unrecognized(String),
}

impl TokenKind {
    #[inline]
    pub fn number(value: f64) -> Self {
        TokenKind::Number(value.to_bits())
    }

    /// Numeric value, if this is a number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TokenKind::Number(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    #[inline]
    pub fn as_tag(&self) -> Option<Tag> {
        match self {
            TokenKind::Tag(tag) => Some(*tag),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number(bits) => format!("number {}", f64::from_bits(*bits)),
            TokenKind::Tag(tag) => format!("tag {tag}"),
            TokenKind::Unrecognized(text) => format!("string {text:?}"),
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(bits) => write!(f, "Number({})", f64::from_bits(*bits)),
            TokenKind::Tag(tag) => write!(f, "Tag({})", tag.as_str()),
            TokenKind::Unrecognized(text) => write!(f, "Unrecognized({text:?})"),
        }
    }
}

/// A token with its span in the source.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Create a token with no source location.
    pub fn dummy(kind: TokenKind) -> Self {
        Token {
            kind,
            span: Span::DUMMY,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Ordered tokens of one shape.
///
/// Equality looks at token kinds only, so a list lexed from
/// text compares equal to the same list produced by the encoder.
#[derive(Clone, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl PartialEq for TokenList {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(other.tokens.iter())
                .all(|(a, b)| a.kind == b.kind)
    }
}

impl Eq for TokenList {}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Build a list of span-less tokens from kinds.
    pub fn from_kinds(kinds: impl IntoIterator<Item = TokenKind>) -> Self {
        TokenList {
            tokens: kinds.into_iter().map(Token::dummy).collect(),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Drop the last token. Returns it, if any.
    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl FromIterator<Token> for TokenList {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}
