//! Hit-testing: closed-form containment tests for each shape variant, handle
//! lookup, and the selection arbitration that decides which of several
//! overlapping shapes a click selects.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::shape::{Shape, ShapeId};
use crate::transform::Point;

/// Which part of a shape was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// An edit grip; the index is into [`Shape::handles`].
    Handle(usize),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub shape_id: ShapeId,
    pub part: HitPart,
}

/// Tolerances for one hit test, already converted to image space.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Grab radius around handles.
    pub handle: f64,
    /// Corridor half-width for polylines.
    pub stroke: f64,
}

// =============================================================
// Geometry
// =============================================================

/// Inclusive axis-aligned box test. Corners may be given in any order.
#[must_use]
pub fn point_in_box(p: Point, a: Point, b: Point) -> bool {
    let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
    let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
    p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y
}

/// Whether `p` lies within `radius` of `center`.
#[must_use]
pub fn point_in_circle(p: Point, center: Point, radius: f64) -> bool {
    p.distance(center) <= radius
}

/// Normalized ellipse equation for the ellipse inscribed in the box `a`–`b`.
#[must_use]
pub fn point_in_ellipse(p: Point, a: Point, b: Point) -> bool {
    let rx = (b.x - a.x).abs() / 2.0;
    let ry = (b.y - a.y).abs() / 2.0;
    if rx == 0.0 || ry == 0.0 {
        return false;
    }
    let cx = (a.x + b.x) / 2.0;
    let cy = (a.y + b.y) / 2.0;
    let nx = (p.x - cx) / rx;
    let ny = (p.y - cy) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Even-odd ray casting over the closed polygon `vertices`.
#[must_use]
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let cross_x = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to the segment `a`–`b`.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Whether `p` is within `tolerance` of any segment of the open path.
#[must_use]
pub fn point_near_polyline(p: Point, vertices: &[Point], tolerance: f64) -> bool {
    match vertices {
        [] => false,
        [only] => p.distance(*only) <= tolerance,
        _ => vertices
            .windows(2)
            .any(|seg| distance_to_segment(p, seg[0], seg[1]) <= tolerance),
    }
}

// =============================================================
// Board-level queries
// =============================================================

/// Find what is under `p`: handles and body of the selected shape first, then
/// the topmost finalized shape whose body contains the point.
#[must_use]
pub fn hit_test(p: Point, shapes: &[Shape], selected: Option<ShapeId>, tol: Tolerance) -> Option<Hit> {
    if let Some(shape) = selected.and_then(|id| shapes.iter().find(|s| s.id() == id)) {
        if !shape.is_drawing() {
            if let Some(index) = shape.handle_at(p, tol.handle) {
                return Some(Hit { shape_id: shape.id(), part: HitPart::Handle(index) });
            }
            if shape.contains(p, tol.stroke) {
                return Some(Hit { shape_id: shape.id(), part: HitPart::Body });
            }
        }
    }
    shapes
        .iter()
        .rev()
        .find(|s| !s.is_drawing() && s.contains(p, tol.stroke))
        .map(|s| Hit { shape_id: s.id(), part: HitPart::Body })
}

/// Indices of finalized shapes containing `p`, topmost first.
#[must_use]
pub fn candidates(p: Point, shapes: &[Shape], stroke_tolerance: f64) -> Vec<usize> {
    (0..shapes.len())
        .rev()
        .filter(|&i| !shapes[i].is_drawing() && shapes[i].contains(p, stroke_tolerance))
        .collect()
}

/// Pick which shape a click selects among overlapping candidates.
///
/// A single candidate wins outright. With several, a click that lands again
/// on the overlap moves to the candidate after the current selection (wrapping
/// to the topmost after the last), so repeated clicks reach occluded shapes.
/// Without a selection among the candidates the topmost wins.
#[must_use]
pub fn arbitrate(candidates: &[usize], shapes: &[Shape], selected: Option<ShapeId>) -> Option<ShapeId> {
    let ids: Vec<ShapeId> = candidates
        .iter()
        .filter_map(|&i| shapes.get(i).map(Shape::id))
        .collect();
    match ids.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => {
            let current = selected.and_then(|sel| ids.iter().position(|&id| id == sel));
            match current {
                Some(pos) => Some(ids[(pos + 1) % ids.len()]),
                None => Some(ids[0]),
            }
        }
    }
}
