//! Token stream reader for shape arrays using logos.
//!
//! Accepts the array bracketed (`[0, 0, "L", 10, 0]`) or bare
//! (`0, 0, "L", 10, 0`), and nested lists of arrays via [`lex_nested`].
//! Quoted strings that match a tag become [`TokenKind::Tag`]; other quoted
//! strings become [`TokenKind::Unrecognized`] and are left for the decoder
//! to reject. Anything that is not a number or a quoted string is a
//! `MalformedToken`.

use eda_ir::{NestedShapeError, ShapeError, Span, Tag, Token, TokenKind, TokenList};
use logos::Logos;
use tracing::trace;

mod json;

pub use json::{nested_from_json, tokens_from_json, tokens_from_json_value};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,

    // Literals that overflow to infinity are rejected here
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok().filter(|n| n.is_finite()))]
    Number(f64),

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    // Bare word: never valid, matched whole for a readable error
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,
}

type Lexeme = (Result<RawToken, ()>, Span);

/// Cursor over the raw lexemes of one input.
struct Reader<'src> {
    source: &'src str,
    lexemes: Vec<Lexeme>,
    pos: usize,
}

impl<'src> Reader<'src> {
    fn new(source: &'src str) -> Self {
        let mut logos = RawToken::lexer(source);
        let mut lexemes = Vec::new();
        while let Some(result) = logos.next() {
            lexemes.push((result, Span::from_range(logos.span())));
        }
        Reader {
            source,
            lexemes,
            pos: 0,
        }
    }

    fn peek(&self) -> Option<Result<RawToken, ()>> {
        self.lexemes.get(self.pos).map(|(raw, _)| *raw)
    }

    fn next(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.pos).copied();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn at_end(&self) -> bool {
        self.pos >= self.lexemes.len()
    }

    fn end_span(&self) -> Span {
        Span::from_range(self.source.len()..self.source.len())
    }

    fn current_span(&self) -> Span {
        self.lexemes
            .get(self.pos)
            .map_or_else(|| self.end_span(), |(_, span)| *span)
    }

    /// Source text from `start` up to the next delimiter.
    fn extent(&self, start: u32) -> (String, Span) {
        let begin = start as usize;
        let rest = self.source.get(begin..).unwrap_or_default();
        let len = rest
            .find(|c: char| matches!(c, ',' | '[' | ']') || c.is_whitespace())
            .unwrap_or(rest.len())
            .max(rest.chars().next().map_or(0, char::len_utf8));
        let span = Span::from_range(begin..begin + len);
        (rest[..len].to_string(), span)
    }

    fn malformed_at(&self, start: u32, offset: usize) -> ShapeError {
        if start as usize >= self.source.len() {
            return ShapeError::malformed_token("end of input", offset, self.end_span());
        }
        let (text, span) = self.extent(start);
        ShapeError::malformed_token(text, offset, span)
    }

    /// Read one element: a number or a quoted string.
    fn read_element(&mut self, offset: usize) -> Result<Token, ShapeError> {
        let start = self.current_span().start;
        match self.next() {
            Some((Ok(RawToken::Number(value)), span)) => {
                Ok(Token::new(TokenKind::number(value), span))
            }
            Some((Ok(RawToken::String), span)) => {
                let slice = &self.source[span.range()];
                let Some(content) = unescape_string(&slice[1..slice.len() - 1]) else {
                    return Err(ShapeError::malformed_token(slice, offset, span));
                };
                let kind = match Tag::lookup(&content) {
                    Some(tag) => TokenKind::Tag(tag),
                    None => TokenKind::Unrecognized(content),
                };
                Ok(Token::new(kind, span))
            }
            _ => Err(self.malformed_at(start, offset)),
        }
    }

    /// Read comma-separated elements up to `]` (bracketed) or end of input.
    fn read_list(&mut self, bracketed: bool) -> Result<TokenList, ShapeError> {
        let mut list = TokenList::new();

        match self.peek() {
            Some(Ok(RawToken::RBracket)) if bracketed => {
                self.next();
                return Ok(list);
            }
            None if !bracketed => return Ok(list),
            _ => {}
        }

        loop {
            let token = self.read_element(list.len())?;
            let element_start = token.span.start;
            list.push(token);

            match self.peek() {
                Some(Ok(RawToken::Comma)) => {
                    self.next();
                }
                Some(Ok(RawToken::RBracket)) if bracketed => {
                    self.next();
                    return Ok(list);
                }
                None if !bracketed => return Ok(list),
                None => return Err(self.malformed_at(self.end_span().start, list.len())),
                // Two elements with no separator: the last element is malformed
                Some(_) => return Err(self.malformed_at(element_start, list.len() - 1)),
            }
        }
    }

    fn expect_end(&self, offset: usize) -> Result<(), ShapeError> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.malformed_at(self.current_span().start, offset))
        }
    }
}

/// Lex one shape array into a `TokenList`.
pub fn lex(source: &str) -> Result<TokenList, ShapeError> {
    let mut reader = Reader::new(source);

    let list = if reader.peek() == Some(Ok(RawToken::LBracket)) {
        reader.next();
        reader.read_list(true)?
    } else {
        reader.read_list(false)?
    };
    reader.expect_end(list.len())?;

    trace!(tokens = list.len(), "lexed shape array");
    Ok(list)
}

/// Lex a bracketed list of shape arrays, e.g. `[[...], [...]]`.
///
/// A fault inside an inner array reports that array's index; a fault in
/// the outer list reports no index and the offset of the outer element.
pub fn lex_nested(source: &str) -> Result<Vec<TokenList>, NestedShapeError> {
    let mut reader = Reader::new(source);
    let mut lists = Vec::new();

    if reader.peek() != Some(Ok(RawToken::LBracket)) {
        return Err(NestedShapeError::outer(
            reader.malformed_at(reader.current_span().start, 0),
        ));
    }
    reader.next();

    if reader.peek() == Some(Ok(RawToken::RBracket)) {
        reader.next();
    } else {
        loop {
            if reader.peek() != Some(Ok(RawToken::LBracket)) {
                return Err(NestedShapeError::outer(
                    reader.malformed_at(reader.current_span().start, lists.len()),
                ));
            }
            reader.next();
            let index = lists.len();
            let list = reader
                .read_list(true)
                .map_err(|error| NestedShapeError::inner(index, error))?;
            lists.push(list);

            match reader.peek() {
                Some(Ok(RawToken::Comma)) => {
                    reader.next();
                }
                Some(Ok(RawToken::RBracket)) => {
                    reader.next();
                    break;
                }
                _ => {
                    return Err(NestedShapeError::outer(
                        reader.malformed_at(reader.current_span().start, lists.len()),
                    ))
                }
            }
        }
    }
    reader
        .expect_end(lists.len())
        .map_err(NestedShapeError::outer)?;

    trace!(arrays = lists.len(), "lexed nested shape arrays");
    Ok(lists)
}

/// Process JSON string escape sequences.
///
/// Returns `None` for an unknown escape, a bad `\uXXXX` sequence, or an
/// unpaired surrogate.
fn unescape_string(s: &str) -> Option<String> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next()? {
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'b' => result.push('\u{8}'),
            'f' => result.push('\u{c}'),
            '\\' => result.push('\\'),
            '/' => result.push('/'),
            '"' => result.push('"'),
            'u' => {
                let high = hex4(&mut chars)?;
                let code = if (0xD800..0xDC00).contains(&high) {
                    if chars.next()? != '\\' || chars.next()? != 'u' {
                        return None;
                    }
                    let low = hex4(&mut chars)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return None;
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                result.push(char::from_u32(code)?);
            }
            _ => return None,
        }
    }

    Some(result)
}

/// Read four hex digits of a `\u` escape.
fn hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0;
    for _ in 0..4 {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}
