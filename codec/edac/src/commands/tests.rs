use super::*;
use pretty_assertions::assert_eq;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

fn nested() -> Options {
    Options {
        nested: true,
        ..Options::default()
    }
}

fn with_format(format: OutputFormat) -> Options {
    Options {
        format,
        ..Options::default()
    }
}

// -- Option parsing --

#[test]
fn parse_defaults() {
    let (options, path) = parse_options(&args(&["shapes.txt"])).unwrap();
    assert_eq!(options, Options::default());
    assert_eq!(path, "shapes.txt");
}

#[test]
fn parse_flags_in_any_position() {
    let (options, path) =
        parse_options(&args(&["--nested", "-", "--format=json", "--path", "--color=never"]))
            .unwrap();
    assert_eq!(
        options,
        Options {
            format: OutputFormat::Json,
            nested: true,
            path: true,
            color: ColorMode::Never,
        }
    );
    assert_eq!(path, "-");
}

#[test]
fn parse_rejects_bad_input() {
    assert_eq!(
        parse_options(&args(&["--format=xml", "a"])).unwrap_err(),
        "unknown format 'xml'"
    );
    assert_eq!(
        parse_options(&args(&["--color=maybe", "a"])).unwrap_err(),
        "unknown color mode 'maybe'"
    );
    assert_eq!(
        parse_options(&args(&["--verbose", "a"])).unwrap_err(),
        "unknown option '--verbose'"
    );
    assert_eq!(
        parse_options(&args(&["a", "b"])).unwrap_err(),
        "unexpected argument 'b'"
    );
    assert_eq!(
        parse_options(&args(&["--nested"])).unwrap_err(),
        "missing input file"
    );
}

// -- lex --

#[test]
fn lex_lists_tokens_with_spans() {
    let out = lex_source(r#"["CIRCLE",0,0,5]"#, &Options::default()).unwrap();
    assert_eq!(
        out,
        concat!(
            "Tokens (4 tokens):\n",
            "  Tag(CIRCLE) @ 1..9\n",
            "  Number(0) @ 10..11\n",
            "  Number(0) @ 12..13\n",
            "  Number(5) @ 14..15\n",
        )
    );
}

#[test]
fn lex_nested_groups_by_shape() {
    let out = lex_source(r#"[[1,2,"L"],["CIRCLE",0,0,5]]"#, &nested()).unwrap();
    assert!(out.starts_with("shape 0 (3 tokens):\n"), "{out}");
    assert!(out.contains("shape 1 (4 tokens):\n"), "{out}");
}

#[test]
fn lex_error_is_shape_error() {
    let err = lex_source("[1,@]", &Options::default()).unwrap_err();
    match err {
        CommandError::Shape(failure) => assert!(failure.error.is_malformed_token()),
        other => panic!("expected shape error, got {other:?}"),
    }
}

// -- decode --

#[test]
fn decode_text_summaries() {
    let source = r#"[[0,0,"L",10,0,10,10],["R",5,5,20,10,0,2],["CIRCLE",0,0,5],[0,0,"ARC",10,10,90],[0,0,"CARC",45,10,10]]"#;
    let out = decode_source(source, &nested()).unwrap();
    assert_eq!(
        out,
        concat!(
            "polygon (0, 0) -> (10, 0) -> (10, 10)\n",
            "rectangle origin=(5, 5) size=20x10 rotation=0 corner_radius=2\n",
            "circle center=(0, 0) radius=5\n",
            "arc start=(0, 0) end=(10, 10) rotation=90\n",
            "center arc start=(0, 0) rotation=45 end=(10, 10)\n",
        )
    );
}

#[test]
fn decode_json_output() {
    let out = decode_source(r#"["CIRCLE",1,2,3]"#, &with_format(OutputFormat::Json)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "count": 1,
            "shapes": [{
                "type": "circle",
                "center": { "x": 1.0, "y": 2.0 },
                "radius": 3.0
            }]
        })
    );
}

#[test]
fn decode_tokens_output() {
    let out = decode_source(r#"[0,0,"ARC",10,10,90]"#, &with_format(OutputFormat::Tokens))
        .unwrap();
    assert_eq!(
        out,
        "Number(0), Number(0), Tag(ARC), Number(10), Number(10), Number(90)\n"
    );
}

#[test]
fn decode_empty_nested_list() {
    assert_eq!(decode_source("[]", &nested()).unwrap(), "");
}

#[test]
fn decode_error_keeps_index() {
    let err = decode_source(r#"[["CIRCLE",0,0,5],["CIRCLE",0,0,-1]]"#, &nested()).unwrap_err();
    match err {
        CommandError::Shape(failure) => {
            assert_eq!(failure.index, Some(1));
            assert!(failure.error.is_invalid_geometry());
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn decode_path_segments() {
    let options = Options {
        path: true,
        ..Options::default()
    };
    let out = decode_source(r#"[0,0,"L",1,1,"ARC",2,2,90]"#, &options).unwrap();
    assert_eq!(
        out,
        concat!(
            "polygon (0, 0) -> (1, 1)\n",
            "arc start=(1, 1) end=(2, 2) rotation=90\n",
        )
    );
}

#[test]
fn decode_nested_paths_keep_index() {
    let options = Options {
        nested: true,
        path: true,
        ..Options::default()
    };
    let source = r#"[[0,0,"L",1,1,"CARC",45,2,2],[0,0,"ARC",1,1]]"#;
    match decode_source(source, &options).unwrap_err() {
        CommandError::Shape(failure) => {
            assert_eq!(failure.index, Some(1));
            assert!(failure.error.is_arity_error());
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

#[test]
fn lex_nested_error_names_inner_array() {
    match lex_source(r#"[[1,1,"L"],[1,@]]"#, &nested()).unwrap_err() {
        CommandError::Shape(failure) => {
            assert_eq!(failure.index, Some(1));
            assert_eq!(failure.error.offset, 1);
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

// -- check / fmt --

#[test]
fn check_counts_shapes() {
    assert_eq!(
        check_source(r#"["CIRCLE",0,0,5]"#, &Options::default()).unwrap(),
        "ok: 1 shape\n"
    );
    assert_eq!(
        check_source(r#"[["CIRCLE",0,0,5],[0,0,"L"]]"#, &nested()).unwrap(),
        "ok: 2 shapes\n"
    );
}

#[test]
fn check_reports_unknown_tag() {
    let err = check_source(r#"[0,0,"XYZ",1,1]"#, &Options::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown shape tag: found string \"XYZ\" (at token 2)"
    );
}

#[test]
fn fmt_canonicalizes() {
    let out = format_source(" \"R\", 5.0, 5 ,20, 10.00, 0, 2 ", &Options::default()).unwrap();
    assert_eq!(out, "[\"R\",5,5,20,10,0,2]\n");
}

#[test]
fn fmt_is_idempotent() {
    let once = format_source(r#"[ [0.50,0,"L", 1,1] , ["CIRCLE",0,0,5] ]"#, &nested()).unwrap();
    let twice = format_source(once.trim_end(), &nested()).unwrap();
    assert_eq!(once, "[[0.5,0,\"L\",1,1],[\"CIRCLE\",0,0,5]]\n");
    assert_eq!(twice, once);
}

// -- input --

#[test]
fn read_missing_file() {
    let err = read_source("/nonexistent/shapes.txt").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot find file '/nonexistent/shapes.txt'"
    );
}

#[test]
fn shape_counts() {
    assert_eq!(count_shapes(0), "0 shapes");
    assert_eq!(count_shapes(1), "1 shape");
    assert_eq!(count_shapes(7), "7 shapes");
}
