//! Shape model.
//!
//! Five immutable value types, one per token-array form, and the [`Shape`]
//! enum over them. Constructors validate; there is no way to build a shape
//! that breaks an invariant, and no way to mutate one afterwards.

use crate::{GeometryViolation, ShapeError};
use std::fmt;

/// A point in the shape's coordinate space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    fn check(self, field: &'static str) -> Result<(), ShapeError> {
        if self.x.is_finite() && self.y.is_finite() {
            Ok(())
        } else {
            Err(ShapeError::invalid_geometry(GeometryViolation::NonFinite {
                field,
            }))
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

fn check_finite(value: f64, field: &'static str) -> Result<(), ShapeError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ShapeError::invalid_geometry(GeometryViolation::NonFinite {
            field,
        }))
    }
}

/// Fieldless discriminant of [`Shape`], used in diagnostics.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShapeKind {
    Polygon,
    Rectangle,
    Circle,
    Arc,
    CenterArc,
}

impl ShapeKind {
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Polygon => "polygon",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Arc => "arc",
            ShapeKind::CenterArc => "center arc",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Closed or open outline: a start point followed by line-to vertices.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Build from the full point sequence; the first point is the start.
    pub fn new(points: Vec<Point>) -> Result<Self, ShapeError> {
        let polygon = Polygon { points };
        polygon.check()?;
        Ok(polygon)
    }

    /// Build from a start point and the vertices that follow it.
    pub fn from_start(start: Point, vertices: impl IntoIterator<Item = Point>) -> Result<Self, ShapeError> {
        let mut points = vec![start];
        points.extend(vertices);
        Self::new(points)
    }

    fn check(&self) -> Result<(), ShapeError> {
        if self.points.is_empty() {
            return Err(ShapeError::invalid_geometry(GeometryViolation::EmptyPolygon));
        }
        self.points.iter().try_for_each(|p| p.check("polygon point"))
    }

    /// Every point, start first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> Point {
        // Non-empty by construction.
        self.points[0]
    }

    /// Line-to vertices after the start point.
    pub fn vertices(&self) -> &[Point] {
        &self.points[1..]
    }
}

/// Axis-aligned (before rotation) rectangle anchored at `origin`.
///
/// Negative width or height mirror the rectangle and are kept as given.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rectangle {
    origin: Point,
    width: f64,
    height: f64,
    rotation: f64,
    corner_radius: f64,
}

impl Rectangle {
    pub fn new(
        origin: Point,
        width: f64,
        height: f64,
        rotation: f64,
        corner_radius: f64,
    ) -> Result<Self, ShapeError> {
        let rectangle = Rectangle {
            origin,
            width,
            height,
            rotation,
            corner_radius,
        };
        rectangle.check()?;
        Ok(rectangle)
    }

    fn check(&self) -> Result<(), ShapeError> {
        self.origin.check("rectangle origin")?;
        check_finite(self.width, "rectangle width")?;
        check_finite(self.height, "rectangle height")?;
        check_finite(self.rotation, "rectangle rotation")?;
        check_finite(self.corner_radius, "rectangle corner radius")?;
        if self.corner_radius < 0.0 {
            return Err(ShapeError::invalid_geometry(
                GeometryViolation::NegativeCornerRadius,
            ));
        }
        Ok(())
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Rotation in degrees, unrestricted.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Result<Self, ShapeError> {
        let circle = Circle { center, radius };
        circle.check()?;
        Ok(circle)
    }

    fn check(&self) -> Result<(), ShapeError> {
        self.center.check("circle center")?;
        check_finite(self.radius, "circle radius")?;
        if self.radius <= 0.0 {
            return Err(ShapeError::invalid_geometry(
                GeometryViolation::NonPositiveRadius,
            ));
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Arc from `start` to `end`; the sign of `rotation` selects the sweep side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Arc {
    start: Point,
    end: Point,
    rotation: f64,
}

impl Arc {
    pub fn new(start: Point, end: Point, rotation: f64) -> Result<Self, ShapeError> {
        let arc = Arc {
            start,
            end,
            rotation,
        };
        arc.check()?;
        Ok(arc)
    }

    fn check(&self) -> Result<(), ShapeError> {
        self.start.check("arc start")?;
        self.end.check("arc end")?;
        check_finite(self.rotation, "arc rotation")
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Rotation in degrees, unrestricted.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CenterArc {
    start: Point,
    rotation: f64,
    end: Point,
}

impl CenterArc {
    pub fn new(start: Point, rotation: f64, end: Point) -> Result<Self, ShapeError> {
        let arc = CenterArc {
            start,
            rotation,
            end,
        };
        arc.check()?;
        Ok(arc)
    }

    fn check(&self) -> Result<(), ShapeError> {
        self.start.check("center arc start")?;
        check_finite(self.rotation, "center arc rotation")?;
        self.end.check("center arc end")
    }

    pub fn start(&self) -> Point {
        self.start
    }

    /// Rotation in degrees, unrestricted.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

/// One decoded shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Shape {
    Polygon(Polygon),
    Rectangle(Rectangle),
    Circle(Circle),
    Arc(Arc),
    CenterArc(CenterArc),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Arc(_) => ShapeKind::Arc,
            Shape::CenterArc(_) => ShapeKind::CenterArc,
        }
    }

    /// Re-check every invariant.
    ///
    /// Always `Ok` for shapes built through the constructors.
    pub fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Shape::Polygon(polygon) => polygon.check(),
            Shape::Rectangle(rectangle) => rectangle.check(),
            Shape::Circle(circle) => circle.check(),
            Shape::Arc(arc) => arc.check(),
            Shape::CenterArc(arc) => arc.check(),
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    pub fn as_rectangle(&self) -> Option<&Rectangle> {
        match self {
            Shape::Rectangle(rectangle) => Some(rectangle),
            _ => None,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    pub fn as_arc(&self) -> Option<&Arc> {
        match self {
            Shape::Arc(arc) => Some(arc),
            _ => None,
        }
    }

    pub fn as_center_arc(&self) -> Option<&CenterArc> {
        match self {
            Shape::CenterArc(arc) => Some(arc),
            _ => None,
        }
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<Rectangle> for Shape {
    fn from(rectangle: Rectangle) -> Self {
        Shape::Rectangle(rectangle)
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Arc> for Shape {
    fn from(arc: Arc) -> Self {
        Shape::Arc(arc)
    }
}

impl From<CenterArc> for Shape {
    fn from(arc: CenterArc) -> Self {
        Shape::CenterArc(arc)
    }
}
