//! Command handlers for the `edac` CLI.
//!
//! Each submodule implements one command. The `*_source` functions do the
//! work on an in-memory string and return the text to print; the `*_file`
//! wrappers read the input, print, and return the process exit code.

use std::io::IsTerminal;

use eda_codec::{NestedShapeError, Shape, ShapeError};
use tracing::debug;

use crate::report::{ColorMode, ErrorReporter};

mod check;
mod decode;
mod fmt;
mod lex;

pub use check::{check_file, check_source};
pub use decode::{decode_file, decode_source};
pub use fmt::{fmt_file, format_source};
pub use lex::{lex_file, lex_source};

/// Output format for `decode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One summary line per shape.
    #[default]
    Text,
    /// Shapes serialized as JSON.
    Json,
    /// The re-encoded token kinds of each shape.
    Tokens,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "tokens" => Some(OutputFormat::Tokens),
            _ => None,
        }
    }
}

/// Flags shared by every command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub format: OutputFormat,
    /// Input is `[[...], [...]]` rather than a single array.
    pub nested: bool,
    /// Each array is a compound path of chained segments.
    pub path: bool,
    pub color: ColorMode,
}

/// Parse command arguments into options and the input path.
///
/// Flags may appear before or after the path. `-` means stdin.
pub fn parse_options(args: &[String]) -> Result<(Options, String), String> {
    let mut options = Options::default();
    let mut path = None;

    for arg in args {
        if let Some(value) = arg.strip_prefix("--format=") {
            options.format =
                OutputFormat::parse(value).ok_or_else(|| format!("unknown format '{value}'"))?;
        } else if let Some(value) = arg.strip_prefix("--color=") {
            options.color =
                ColorMode::parse(value).ok_or_else(|| format!("unknown color mode '{value}'"))?;
        } else if arg == "--nested" {
            options.nested = true;
        } else if arg == "--path" {
            options.path = true;
        } else if arg == "-" || !arg.starts_with('-') {
            if path.is_some() {
                return Err(format!("unexpected argument '{arg}'"));
            }
            path = Some(arg.clone());
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
    }

    let path = path.ok_or_else(|| "missing input file".to_string())?;
    Ok((options, path))
}

/// Failure of a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Read(String),

    #[error(transparent)]
    Shape(#[from] NestedShapeError),

    #[error("cannot encode shape: {0}")]
    Encode(#[from] ShapeError),

    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read the input file, or stdin for `-`.
pub(crate) fn read_source(path: &str) -> Result<String, CommandError> {
    debug!(path, "reading input");
    let result = if path == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };

    result.map_err(|e| {
        let msg = match e.kind() {
            std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
            std::io::ErrorKind::PermissionDenied => {
                format!("permission denied reading '{path}'")
            }
            std::io::ErrorKind::InvalidData => {
                format!("'{path}' contains invalid UTF-8 data")
            }
            _ => format!("error reading '{path}': {e}"),
        };
        CommandError::Read(msg)
    })
}

/// Decode the input as one array, a list of arrays, or paths of either.
pub(crate) fn decode_input(source: &str, options: &Options) -> Result<Vec<Shape>, NestedShapeError> {
    match (options.nested, options.path) {
        (false, false) => eda_codec::decode_str(source)
            .map(|shape| vec![shape])
            .map_err(NestedShapeError::outer),
        (false, true) => eda_codec::decode_path_str(source).map_err(NestedShapeError::outer),
        (true, false) => eda_codec::decode_all_str(source),
        (true, true) => {
            let mut shapes = Vec::new();
            for (index, tokens) in eda_lexer::lex_nested(source)?.iter().enumerate() {
                let path = eda_codec::decode_path(tokens.as_slice())
                    .map_err(|error| NestedShapeError::inner(index, error))?;
                shapes.extend(path);
            }
            Ok(shapes)
        }
    }
}

/// Shared driver for the `*_file` wrappers.
pub(crate) fn run_file(
    path: &str,
    options: &Options,
    command: impl FnOnce(&str, &Options) -> Result<String, CommandError>,
) -> i32 {
    let source = match read_source(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    match command(&source, options) {
        Ok(out) => {
            print!("{out}");
            0
        }
        Err(CommandError::Shape(failure)) => {
            let stderr = std::io::stderr();
            let is_tty = stderr.is_terminal();
            let mut reporter = ErrorReporter::with_color_mode(stderr.lock(), options.color, is_tty);
            if let Err(e) = reporter.emit(path, &source, &failure) {
                eprintln!("error: {failure} ({e})");
            }
            1
        }
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

/// "1 shape", "3 shapes".
pub(crate) fn count_shapes(count: usize) -> String {
    if count == 1 {
        "1 shape".to_string()
    } else {
        format!("{count} shapes")
    }
}

#[cfg(test)]
mod tests;
