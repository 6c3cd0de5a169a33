//! `edac decode`: decode and print shapes.

use std::fmt::Write;

use eda_codec::{encode, Point, Shape};
use serde::Serialize;

use super::{decode_input, run_file, CommandError, OutputFormat, Options};

/// JSON document written by `--format=json`.
#[derive(Serialize)]
struct Decoded<'a> {
    count: usize,
    shapes: &'a [Shape],
}

/// Decode `source` and render the shapes in the requested format.
pub fn decode_source(source: &str, options: &Options) -> Result<String, CommandError> {
    let shapes = decode_input(source, options)?;

    let mut out = match options.format {
        OutputFormat::Text => shapes
            .iter()
            .map(summarize)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&Decoded {
            count: shapes.len(),
            shapes: &shapes,
        })?,
        OutputFormat::Tokens => {
            let mut lines = Vec::with_capacity(shapes.len());
            for shape in &shapes {
                let tokens = encode(shape)?;
                let kinds: Vec<_> = tokens.iter().map(|t| format!("{:?}", t.kind)).collect();
                lines.push(kinds.join(", "));
            }
            lines.join("\n")
        }
    };
    if !out.is_empty() {
        out.push('\n');
    }
    Ok(out)
}

/// One-line description of a shape.
pub(crate) fn summarize(shape: &Shape) -> String {
    let mut out = String::new();
    match shape {
        Shape::Polygon(polygon) => {
            let _ = write!(out, "polygon {}", point(polygon.start()));
            for vertex in polygon.vertices() {
                let _ = write!(out, " -> {}", point(*vertex));
            }
        }
        Shape::Rectangle(rect) => {
            let _ = write!(
                out,
                "rectangle origin={} size={}x{} rotation={} corner_radius={}",
                point(rect.origin()),
                rect.width(),
                rect.height(),
                rect.rotation(),
                rect.corner_radius()
            );
        }
        Shape::Circle(circle) => {
            let _ = write!(
                out,
                "circle center={} radius={}",
                point(circle.center()),
                circle.radius()
            );
        }
        Shape::Arc(arc) => {
            let _ = write!(
                out,
                "arc start={} end={} rotation={}",
                point(arc.start()),
                point(arc.end()),
                arc.rotation()
            );
        }
        Shape::CenterArc(arc) => {
            let _ = write!(
                out,
                "center arc start={} rotation={} end={}",
                point(arc.start()),
                arc.rotation(),
                point(arc.end())
            );
        }
    }
    out
}

fn point(p: Point) -> String {
    format!("({}, {})", p.x, p.y)
}

pub fn decode_file(path: &str, options: &Options) -> i32 {
    run_file(path, options, decode_source)
}
