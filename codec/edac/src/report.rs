//! Terminal rendering of codec errors.
//!
//! ```text
//! error[S0003]: unknown shape tag: found string "XYZ" (at token 2)
//!  --> shapes.txt:1:6
//!   |
//! 1 | [0,0,"XYZ",1,1]
//!   |      ^^^^^
//! ```

use std::io::{self, Write};

use eda_codec::{NestedShapeError, Span};

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse the value of `--color=`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes codec errors with a source excerpt.
pub struct ErrorReporter<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> ErrorReporter<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        ErrorReporter {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    fn paint(&mut self, color: &str, text: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }

    /// Report `failure`, pointing into `source` when the span is real.
    pub fn emit(&mut self, path: &str, source: &str, failure: &NestedShapeError) -> io::Result<()> {
        let code = failure.error.code();
        self.paint(colors::ERROR, &format!("error[{code}]"))?;
        self.paint(colors::BOLD, &format!(": {failure}"))?;
        writeln!(self.writer)?;

        let span = failure.error.span;
        let Some(location) = locate(source, span) else {
            self.paint(colors::SECONDARY, " --> ")?;
            writeln!(self.writer, "{path}")?;
            return Ok(());
        };

        let gutter = " ".repeat(location.line.to_string().len());
        self.paint(colors::SECONDARY, &format!("{gutter}--> "))?;
        writeln!(self.writer, "{path}:{}:{}", location.line, location.column)?;

        self.paint(colors::SECONDARY, &format!("{gutter} |"))?;
        writeln!(self.writer)?;

        self.paint(colors::SECONDARY, &format!("{} | ", location.line))?;
        writeln!(self.writer, "{}", location.text)?;

        self.paint(colors::SECONDARY, &format!("{gutter} | "))?;
        let pad = " ".repeat(location.column - 1);
        write!(self.writer, "{pad}")?;
        self.paint(colors::ERROR, &"^".repeat(location.width))?;
        writeln!(self.writer)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Line, column and width of a span, all counted in characters.
#[derive(Debug, PartialEq, Eq)]
pub struct Location<'a> {
    pub line: usize,
    pub column: usize,
    pub width: usize,
    pub text: &'a str,
}

/// Resolve a span to the source line it starts on.
///
/// Returns `None` for dummy spans and spans outside `source`.
pub fn locate(source: &str, span: Span) -> Option<Location<'_>> {
    if span.is_dummy() {
        return None;
    }
    let start = span.start as usize;
    let end = (span.end as usize).min(source.len());
    if start > source.len() || !source.is_char_boundary(start) {
        return None;
    }

    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);
    let text = source[line_start..line_end].trim_end_matches('\r');

    let column = source[line_start..start].chars().count() + 1;
    let width = source
        .get(start..end.min(line_end).max(start))
        .map_or(0, |s| s.chars().count())
        .max(1);

    Some(Location {
        line: source[..line_start].matches('\n').count() + 1,
        column,
        width,
        text,
    })
}
