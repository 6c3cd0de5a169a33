//! `edac lex`: print the token stream.

use std::fmt::Write;

use eda_codec::{NestedShapeError, TokenList};

use super::{run_file, CommandError, Options};

/// Lex `source` and list each token with its span.
pub fn lex_source(source: &str, options: &Options) -> Result<String, CommandError> {
    let mut out = String::new();

    if options.nested {
        let lists = eda_lexer::lex_nested(source)?;
        for (index, tokens) in lists.iter().enumerate() {
            let _ = writeln!(out, "shape {index} ({} tokens):", tokens.len());
            write_tokens(&mut out, tokens);
        }
    } else {
        let tokens = eda_lexer::lex(source).map_err(NestedShapeError::outer)?;
        let _ = writeln!(out, "Tokens ({} tokens):", tokens.len());
        write_tokens(&mut out, &tokens);
    }

    Ok(out)
}

fn write_tokens(out: &mut String, tokens: &TokenList) {
    for tok in tokens {
        let _ = writeln!(out, "  {:?} @ {}", tok.kind, tok.span);
    }
}

pub fn lex_file(path: &str, options: &Options) -> i32 {
    run_file(path, options, lex_source)
}
