//! `edac fmt`: print the canonical encoding.
//!
//! Output has no whitespace and numbers in shortest round-trip form, so
//! formatting is idempotent.

use eda_codec::{encode_all_to_string, encode_to_string};

use super::{decode_input, run_file, CommandError, Options};

pub fn format_source(source: &str, options: &Options) -> Result<String, CommandError> {
    let shapes = decode_input(source, options)?;

    let mut out = if options.nested {
        encode_all_to_string(&shapes)?
    } else {
        shapes
            .iter()
            .map(encode_to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n")
    };
    out.push('\n');
    Ok(out)
}

pub fn fmt_file(path: &str, options: &Options) -> i32 {
    run_file(path, options, format_source)
}
