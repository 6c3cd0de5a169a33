use super::*;
use eda_ir::TokenList;
use eda_lexer::lex;
use pretty_assertions::assert_eq;

fn decode_text(source: &str) -> Result<Shape, ShapeError> {
    decode(lex(source).unwrap().as_slice())
}

fn arity(err: &ShapeError) -> (ShapeKind, Arity, usize) {
    match err.kind {
        ShapeErrorKind::ArityError {
            shape,
            expected,
            found,
        } => (shape, expected, found),
        ref other => panic!("expected ArityError, got {other:?}"),
    }
}

fn unknown_found(err: &ShapeError) -> Option<String> {
    match &err.kind {
        ShapeErrorKind::UnknownShapeTag { found } => found.clone(),
        other => panic!("expected UnknownShapeTag, got {other:?}"),
    }
}

// === Dispatch ===

#[test]
fn rectangle_dispatches_on_position_zero() {
    let shape = decode_text(r#"["R", 5, 5, 20, 10, 0, 2]"#).unwrap();
    let rect = shape.as_rectangle().unwrap();
    assert_eq!(rect.origin(), Point::new(5.0, 5.0));
    assert_eq!(rect.corner_radius(), 2.0);
}

#[test]
fn circle_dispatches_on_position_zero() {
    let shape = decode_text(r#"["CIRCLE", 1, 2, 3]"#).unwrap();
    assert_eq!(
        shape,
        Shape::from(Circle::new(Point::new(1.0, 2.0), 3.0).unwrap())
    );
}

#[test]
fn polygon_without_vertices() {
    let shape = decode_text(r#"[4, 5, "L"]"#).unwrap();
    let polygon = shape.as_polygon().unwrap();
    assert_eq!(polygon.start(), Point::new(4.0, 5.0));
    assert!(polygon.vertices().is_empty());
}

#[test]
fn arc_field_order() {
    let shape = decode_text(r#"[1, 2, "ARC", 3, 4, -90]"#).unwrap();
    let arc = shape.as_arc().unwrap();
    assert_eq!(arc.start(), Point::new(1.0, 2.0));
    assert_eq!(arc.end(), Point::new(3.0, 4.0));
    assert_eq!(arc.rotation(), -90.0);
}

#[test]
fn center_arc_field_order() {
    let shape = decode_text(r#"[1, 2, "CARC", 180, 3, 4]"#).unwrap();
    let arc = shape.as_center_arc().unwrap();
    assert_eq!(arc.start(), Point::new(1.0, 2.0));
    assert_eq!(arc.rotation(), 180.0);
    assert_eq!(arc.end(), Point::new(3.0, 4.0));
}

#[test]
fn negative_rectangle_extent_preserved() {
    let shape = decode_text(r#"["R", 0, 0, -4, -2, 370, 0]"#).unwrap();
    let rect = shape.as_rectangle().unwrap();
    assert_eq!((rect.width(), rect.height()), (-4.0, -2.0));
    assert_eq!(rect.rotation(), 370.0);
}

// === Arity ===

#[test]
fn rectangle_shortfall() {
    let err = decode_text(r#"["R", 5, 5, 20, 10, 0]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Rectangle, Arity::Exactly(6), 5));
    assert_eq!(err.offset, 6);
}

#[test]
fn circle_excess() {
    let err = decode_text(r#"["CIRCLE", 0, 0, 5, 6]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Circle, Arity::Exactly(3), 4));
    assert_eq!(err.offset, 4);
}

#[test]
fn non_numeric_operand_is_arity_error() {
    let err = decode_text(r#"["R", 5, "L", 20, 10, 0, 2]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Rectangle, Arity::Exactly(6), 1));
    assert_eq!(err.offset, 2);
    assert_eq!(err.span, Span::new(9, 12));
}

#[test]
fn arc_shortfall_points_past_end() {
    let err = decode_text(r#"[0, 0, "ARC", 10, 10]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Arc, Arity::Exactly(3), 2));
    assert_eq!(err.offset, 5);
    assert_eq!(err.span, Span::point(20));
}

#[test]
fn center_arc_trailing_tag() {
    let err = decode_text(r#"[0, 0, "CARC", 45, 10, 10, "L"]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::CenterArc, Arity::Exactly(3), 3));
    assert_eq!(err.offset, 6);
}

#[test]
fn polygon_odd_tail() {
    let err = decode_text(r#"[0, 0, "L", 10, 0, 10]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Polygon, Arity::Even, 3));
    assert_eq!(err.offset, 6);
}

#[test]
fn polygon_tag_in_tail() {
    let err = decode_text(r#"[0, 0, "L", 10, 0, "ARC", 1, 1, 90]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Polygon, Arity::Even, 2));
    assert_eq!(err.offset, 5);
}

// === Discriminator ===

#[test]
fn unknown_tag_at_position_two() {
    let err = decode_text(r#"[0, 0, "XYZ", 1, 1]"#).unwrap_err();
    assert_eq!(unknown_found(&err), Some("string \"XYZ\"".into()));
    assert_eq!(err.offset, 2);
}

#[test]
fn tag_first_forms_not_accepted_at_position_two() {
    let err = decode_text(r#"[0, 0, "R", 1, 1, 0, 0]"#).unwrap_err();
    assert_eq!(unknown_found(&err), Some("tag \"R\"".into()));
}

#[test]
fn start_tagged_forms_not_accepted_at_position_zero() {
    let err = decode_text(r#"["L", 0, 0]"#).unwrap_err();
    assert_eq!(unknown_found(&err), Some("tag \"L\"".into()));
    assert_eq!(err.offset, 0);
}

#[test]
fn number_in_discriminator_position() {
    let err = decode_text("[0, 0, 1, 1]").unwrap_err();
    assert_eq!(unknown_found(&err), Some("number 1".into()));
}

#[test]
fn non_numeric_start_y() {
    let err = decode_text(r#"[0, "L", 1, 1]"#).unwrap_err();
    assert!(err.is_unknown_shape_tag());
    assert_eq!(err.offset, 1);
}

#[test]
fn short_streams() {
    for source in ["[]", "[0]", "[0, 0]"] {
        let err = decode_text(source).unwrap_err();
        assert_eq!(unknown_found(&err), None, "{source}");
    }
}

// === Geometry ===

#[test]
fn zero_radius_points_at_radius() {
    let err = decode_text(r#"["CIRCLE", 0, 0, 0]"#).unwrap_err();
    assert_eq!(
        err.kind,
        ShapeErrorKind::InvalidGeometry {
            violation: GeometryViolation::NonPositiveRadius
        }
    );
    assert_eq!(err.offset, 3);
}

#[test]
fn negative_corner_radius_points_at_radius() {
    let err = decode_text(r#"["R", 0, 0, 1, 1, 0, -1]"#).unwrap_err();
    assert!(err.is_invalid_geometry());
    assert_eq!(err.offset, 6);
}

#[test]
fn non_finite_operand_is_invalid_geometry() {
    let tokens = TokenList::from_kinds([
        TokenKind::number(0.0),
        TokenKind::number(0.0),
        TokenKind::Tag(Tag::Arc),
        TokenKind::number(f64::INFINITY),
        TokenKind::number(0.0),
        TokenKind::number(90.0),
    ]);
    let err = decode(tokens.as_slice()).unwrap_err();
    assert!(err.is_invalid_geometry());
    assert_eq!(err.offset, 3);
}

// === Paths ===

fn decode_path_text(source: &str) -> Result<Vec<Shape>, ShapeError> {
    decode_path(lex(source).unwrap().as_slice())
}

#[test]
fn path_chains_line_arc_and_center_arc() {
    let shapes =
        decode_path_text(r#"[0, 0, "L", 10, 0, 10, 5, "ARC", 20, 5, 90, "CARC", 45, 20, 0]"#)
            .unwrap();
    assert_eq!(shapes.len(), 3);

    let polygon = shapes[0].as_polygon().unwrap();
    assert_eq!(polygon.start(), Point::new(0.0, 0.0));
    assert_eq!(
        polygon.vertices(),
        &[Point::new(10.0, 0.0), Point::new(10.0, 5.0)]
    );

    let arc = shapes[1].as_arc().unwrap();
    assert_eq!(arc.start(), Point::new(10.0, 5.0));
    assert_eq!(arc.end(), Point::new(20.0, 5.0));
    assert_eq!(arc.rotation(), 90.0);

    let center_arc = shapes[2].as_center_arc().unwrap();
    assert_eq!(center_arc.start(), Point::new(20.0, 5.0));
    assert_eq!(center_arc.rotation(), 45.0);
    assert_eq!(center_arc.end(), Point::new(20.0, 0.0));
}

#[test]
fn path_line_after_arc() {
    let shapes = decode_path_text(r#"[0, 0, "L", 1, 1, "ARC", 2, 2, 90, "L", 3, 3]"#).unwrap();
    let kinds: Vec<_> = shapes.iter().map(Shape::kind).collect();
    assert_eq!(
        kinds,
        vec![ShapeKind::Polygon, ShapeKind::Arc, ShapeKind::Polygon]
    );
    assert_eq!(shapes[2].as_polygon().unwrap().start(), Point::new(2.0, 2.0));
}

#[test]
fn path_of_one_shape_matches_decode() {
    for source in [
        r#"[0, 0, "L", 10, 0, 10, 10]"#,
        r#"["R", 5, 5, 20, 10, 0, 2]"#,
        r#"["CIRCLE", 0, 0, 5]"#,
        r#"[0, 0, "ARC", 10, 10, 90]"#,
        r#"[0, 0, "CARC", 45, 10, 10]"#,
    ] {
        assert_eq!(
            decode_path_text(source).unwrap(),
            vec![decode_text(source).unwrap()],
            "{source}"
        );
    }
}

#[test]
fn path_closed_shapes_can_follow_segments() {
    let shapes =
        decode_path_text(r#"[0, 0, "L", 1, 1, "CIRCLE", 5, 5, 1, "R", 0, 0, 2, 2, 0, 0]"#)
            .unwrap();
    let kinds: Vec<_> = shapes.iter().map(Shape::kind).collect();
    assert_eq!(
        kinds,
        vec![ShapeKind::Polygon, ShapeKind::Circle, ShapeKind::Rectangle]
    );
}

#[test]
fn path_line_after_closed_shape_has_no_start() {
    let err = decode_path_text(r#"["CIRCLE", 0, 0, 5, "L", 1, 1]"#).unwrap_err();
    assert_eq!(unknown_found(&err).as_deref(), Some("tag \"L\""));
    assert_eq!(err.offset, 4);
}

#[test]
fn path_segment_shortfall_indexes_whole_path() {
    let err = decode_path_text(r#"[0, 0, "L", 1, 1, "ARC", 2, 2, "L", 3, 3]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Arc, Arity::Exactly(3), 2));
    assert_eq!(err.offset, 8);
}

#[test]
fn path_odd_line_run() {
    let err = decode_path_text(r#"[0, 0, "L", 1, 1, 2, "ARC", 2, 2, 90]"#).unwrap_err();
    assert_eq!(arity(&err), (ShapeKind::Polygon, Arity::Even, 3));
    assert_eq!(err.offset, 6);
}

#[test]
fn path_unknown_command() {
    let err = decode_path_text(r#"[0, 0, "L", 1, 1, "M", 2, 2]"#).unwrap_err();
    assert_eq!(unknown_found(&err).as_deref(), Some("string \"M\""));
    assert_eq!(err.offset, 5);
}

#[test]
fn path_geometry_error_points_at_segment() {
    let err = decode_path_text(r#"[0, 0, "L", 1, 1, "CIRCLE", 5, 5, 0]"#).unwrap_err();
    assert!(err.is_invalid_geometry());
    assert_eq!(err.offset, 8);
}

#[test]
fn empty_path_has_no_discriminator() {
    let err = decode_path(&[]).unwrap_err();
    assert_eq!(unknown_found(&err), None);
    assert_eq!(err.offset, 0);
}
