//! Shape geometry for the line, rectangle and circle tools.
//!
//! Every shape is defined by two points: the anchor where the pointer went
//! down and the current pointer position.

use crate::util::Rect;

/// A position on the surface in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Shapes whose preview is redrawn from scratch on every pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
}

/// Resolved outline of a shape, ready for stroking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    /// Straight segment from the anchor to the pointer
    Line { from: Point, to: Point },
    /// Axis-aligned box with non-negative extents
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Circle centered on the anchor
    Circle { center: Point, radius: f64 },
}

impl Outline {
    /// Computes the outline `kind` describes for an anchor and pointer position.
    pub fn from_points(kind: ShapeKind, anchor: Point, point: Point) -> Self {
        match kind {
            ShapeKind::Line => Outline::Line {
                from: anchor,
                to: point,
            },
            ShapeKind::Rectangle => {
                let (x, y, width, height) = normalized_rect(anchor, point);
                Outline::Rect {
                    x,
                    y,
                    width,
                    height,
                }
            }
            ShapeKind::Circle => Outline::Circle {
                center: anchor,
                radius: circle_radius(anchor, point),
            },
        }
    }

    /// Returns the axis-aligned bounding box, expanded to cover the stroke width.
    pub fn bounding_box(&self, stroke_width: f64) -> Option<Rect> {
        let pad = stroke_padding(stroke_width);
        match *self {
            Outline::Line { from, to } => bounding_box_for_segment(from, to, stroke_width),
            Outline::Rect {
                x,
                y,
                width,
                height,
            } => Rect::covering(x - pad, y - pad, x + width + pad, y + height + pad),
            Outline::Circle { center, radius } => Rect::covering(
                center.x - radius - pad,
                center.y - radius - pad,
                center.x + radius + pad,
                center.y + radius + pad,
            ),
        }
    }
}

/// Normalizes the box spanned by two corners into `(x, y, width, height)`
/// with non-negative width and height.
pub fn normalized_rect(anchor: Point, point: Point) -> (f64, f64, f64, f64) {
    let x = anchor.x.min(point.x);
    let y = anchor.y.min(point.y);
    let width = (point.x - anchor.x).abs();
    let height = (point.y - anchor.y).abs();
    (x, y, width, height)
}

/// Radius of a circle centered at `anchor` passing through `point`.
pub fn circle_radius(anchor: Point, point: Point) -> f64 {
    anchor.distance_to(point)
}

fn stroke_padding(width: f64) -> f64 {
    (width / 2.0).ceil().max(1.0)
}

pub(crate) fn bounding_box_for_segment(from: Point, to: Point, width: f64) -> Option<Rect> {
    let pad = stroke_padding(width);
    Rect::covering(
        from.x.min(to.x) - pad,
        from.y.min(to.y) - pad,
        from.x.max(to.x) + pad,
        from.y.max(to.y) + pad,
    )
}

pub(crate) fn bounding_box_for_disc(center: Point, diameter: f64) -> Option<Rect> {
    let radius = diameter / 2.0 + 1.0;
    Rect::covering(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    )
}
