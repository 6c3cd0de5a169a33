//! `edac check`: validate input, print only a count.

use super::{count_shapes, decode_input, run_file, CommandError, Options};

pub fn check_source(source: &str, options: &Options) -> Result<String, CommandError> {
    let shapes = decode_input(source, options)?;
    Ok(format!("ok: {}\n", count_shapes(shapes.len())))
}

pub fn check_file(path: &str, options: &Options) -> i32 {
    run_file(path, options, check_source)
}
