//! Shape variants: geometry, construction steps, edit operations and the
//! lazily built render path.
//!
//! A [`Shape`] stores its points in image space only, which is why pan and
//! zoom never touch stored geometry. The variant behaviour is selected by a
//! closed [`ShapeKind`]; the string tag a shape was created under is kept
//! separately so registered aliases survive an export/import round trip.
//!
//! Two-point variants (rect, circle, ellipse) are sized by a drag from an
//! anchor. Multi-point variants (polygon, polyline) collect one vertex per
//! click and show a pending edge to the pointer while under construction.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::cell::OnceCell;

use serde::{Deserialize, Serialize};

use crate::hit;
use crate::path::{PathCommand, PathData};
use crate::record::{LabelData, ShapeRecord};
use crate::transform::{Point, Size};

/// Unique identifier for a shape within one board.
pub type ShapeId = u64;

/// Geometric behaviour of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle spanned by two opposite corners.
    Rect,
    /// Circle given by its center and a point on the rim.
    Circle,
    /// Axis-aligned ellipse inscribed in the box spanned by two corners.
    Ellipse,
    /// Closed polygon.
    Polygon,
    /// Open chain of segments with no interior.
    Polyline,
}

impl ShapeKind {
    /// Every built-in variant.
    pub const ALL: [ShapeKind; 5] = [Self::Rect, Self::Circle, Self::Ellipse, Self::Polygon, Self::Polyline];

    /// Canonical type tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
        }
    }

    /// Whether the variant is defined by exactly two points set by a drag.
    #[must_use]
    pub fn is_two_point(self) -> bool {
        matches!(self, Self::Rect | Self::Circle | Self::Ellipse)
    }

    /// Fewest points a finished shape of this variant has.
    #[must_use]
    pub fn min_points(self) -> usize {
        match self {
            Self::Polygon => 3,
            _ => 2,
        }
    }
}

/// Lifecycle status of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStatus {
    /// Under construction (or armed and waiting for its first point).
    Drawing,
    /// Finished, selectable and exported.
    Normal,
}

/// One annotation on the board.
#[derive(Debug, Clone)]
pub struct Shape {
    id: ShapeId,
    tag: String,
    kind: ShapeKind,
    label: String,
    color: String,
    status: ShapeStatus,
    points: Vec<Point>,
    preview: Option<Point>,
    path: OnceCell<PathData>,
}

impl Shape {
    /// A new, empty shape in `Drawing` status.
    #[must_use]
    pub fn new(id: ShapeId, tag: impl Into<String>, kind: ShapeKind, color: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            kind,
            label: String::new(),
            color: color.into(),
            status: ShapeStatus::Drawing,
            points: Vec::new(),
            preview: None,
            path: OnceCell::new(),
        }
    }

    /// Rebuild a finished shape from its record.
    #[must_use]
    pub fn from_record(record: &ShapeRecord, kind: ShapeKind) -> Self {
        Self {
            id: record.id,
            tag: record.tag.clone(),
            kind,
            label: record.label.clone(),
            color: record.color.clone(),
            status: ShapeStatus::Normal,
            points: record.point_list.clone(),
            preview: None,
            path: OnceCell::new(),
        }
    }

    /// Project the shape to its plain-data record.
    #[must_use]
    pub fn to_record(&self, resolution: Size) -> ShapeRecord {
        ShapeRecord {
            id: self.id,
            label: self.label.clone(),
            tag: self.tag.clone(),
            color: self.color.clone(),
            point_list: self.result_points(),
            resolution,
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn id(&self) -> ShapeId {
        self.id
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    #[must_use]
    pub fn status(&self) -> ShapeStatus {
        self.status
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.status == ShapeStatus::Drawing
    }

    /// A drawing shape that has received at least one point.
    #[must_use]
    pub fn is_under_construction(&self) -> bool {
        self.is_drawing() && !self.points.is_empty()
    }

    /// Raw points in image space, in input order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Pending-edge end point of a multi-point construction.
    #[must_use]
    pub fn preview(&self) -> Option<Point> {
        self.preview
    }

    pub fn set_label_color(&mut self, data: LabelData) {
        self.label = data.label;
        self.color = data.color;
    }

    // --- Construction ---

    /// Record the first point of a construction.
    pub fn begin(&mut self, p: Point) {
        self.points = if self.kind.is_two_point() { vec![p, p] } else { vec![p] };
        self.preview = None;
        self.invalidate();
    }

    /// Follow the pointer: resize a two-point shape, or move the pending edge
    /// of a multi-point one.
    pub fn extend(&mut self, p: Point) {
        if self.kind.is_two_point() {
            if let Some(last) = self.points.get_mut(1) {
                *last = p;
            }
        } else if !self.points.is_empty() {
            self.preview = Some(p);
        }
        self.invalidate();
    }

    /// Append a vertex to a multi-point construction.
    pub fn add_vertex(&mut self, p: Point) {
        self.points.push(p);
        self.preview = None;
        self.invalidate();
    }

    /// Drop the most recent vertex. Returns how many remain.
    pub fn remove_last_vertex(&mut self) -> usize {
        self.points.pop();
        if self.points.is_empty() {
            self.preview = None;
        }
        self.invalidate();
        self.points.len()
    }

    /// Forget every point, returning the shape to its armed state.
    pub fn reset(&mut self) {
        self.points.clear();
        self.preview = None;
        self.invalidate();
    }

    /// Zero-area two-point shape. Multi-point shapes are never degenerate;
    /// they simply cannot complete until they have enough vertices.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        if !self.kind.is_two_point() {
            return false;
        }
        match self.points.as_slice() {
            [a, b] => match self.kind {
                ShapeKind::Circle => a == b,
                _ => a.x == b.x || a.y == b.y,
            },
            _ => true,
        }
    }

    /// Whether the construction has enough geometry to be finalized.
    #[must_use]
    pub fn can_complete(&self) -> bool {
        if self.kind.is_two_point() {
            !self.is_degenerate()
        } else {
            self.points.len() >= self.kind.min_points()
        }
    }

    /// Whether a click at `p` closes the polygon on its first vertex.
    #[must_use]
    pub fn closes_at(&self, p: Point, tolerance: f64) -> bool {
        self.kind == ShapeKind::Polygon
            && self.points.len() >= self.kind.min_points()
            && self.points.first().is_some_and(|first| first.distance(p) <= tolerance)
    }

    /// Stamp label data and flip to `Normal`.
    pub fn finalize(&mut self, data: LabelData) {
        self.set_label_color(data);
        self.status = ShapeStatus::Normal;
        self.preview = None;
        self.invalidate();
    }

    // --- Geometry ---

    /// Containment test in image space. `stroke_tolerance` is only used by
    /// polylines, which have no interior.
    #[must_use]
    pub fn contains(&self, p: Point, stroke_tolerance: f64) -> bool {
        match (self.kind, self.points.as_slice()) {
            (ShapeKind::Rect, [a, b]) => hit::point_in_box(p, *a, *b),
            (ShapeKind::Circle, [center, rim]) => hit::point_in_circle(p, *center, center.distance(*rim)),
            (ShapeKind::Ellipse, [a, b]) => hit::point_in_ellipse(p, *a, *b),
            (ShapeKind::Polygon, vertices) => hit::point_in_polygon(p, vertices),
            (ShapeKind::Polyline, vertices) => hit::point_near_polyline(p, vertices, stroke_tolerance),
            _ => false,
        }
    }

    /// Axis-aligned bounding box as `(min, max)`, if the shape has points.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        if let (ShapeKind::Circle, [center, rim]) = (self.kind, self.points.as_slice()) {
            let r = center.distance(*rim);
            return Some((Point::new(center.x - r, center.y - r), Point::new(center.x + r, center.y + r)));
        }
        let first = self.points.first()?;
        let init = (*first, *first);
        Some(self.points.iter().fold(init, |(min, max), p| {
            (Point::new(min.x.min(p.x), min.y.min(p.y)), Point::new(max.x.max(p.x), max.y.max(p.y)))
        }))
    }

    /// Where the 1-based index label is drawn.
    #[must_use]
    pub fn index_point(&self) -> Point {
        self.bounds().map(|(min, _)| min).unwrap_or_default()
    }

    /// Canonical point list for consumers: normalized corners for box-like
    /// shapes, `[center, rim]` for circles, vertices otherwise.
    #[must_use]
    pub fn result_points(&self) -> Vec<Point> {
        match self.kind {
            ShapeKind::Rect | ShapeKind::Ellipse if self.points.len() == 2 => {
                self.bounds().map_or_else(Vec::new, |(min, max)| vec![min, max])
            }
            _ => self.points.clone(),
        }
    }

    /// Edit grips in image space.
    #[must_use]
    pub fn handles(&self) -> Vec<Point> {
        match (self.kind, self.points.as_slice()) {
            (ShapeKind::Rect | ShapeKind::Ellipse, [_, _]) => self.bounds().map_or_else(Vec::new, |(min, max)| {
                vec![min, Point::new(max.x, min.y), max, Point::new(min.x, max.y)]
            }),
            (ShapeKind::Circle, [_, rim]) => vec![*rim],
            (ShapeKind::Polygon | ShapeKind::Polyline, vertices) => vertices.to_vec(),
            _ => Vec::new(),
        }
    }

    /// Index of the closest handle within `tolerance` of `p`.
    #[must_use]
    pub fn handle_at(&self, p: Point, tolerance: f64) -> Option<usize> {
        self.handles()
            .iter()
            .enumerate()
            .map(|(i, h)| (i, h.distance(p)))
            .filter(|&(_, d)| d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }

    /// The point that stays fixed while handle `index` is dragged: the
    /// opposite corner for box-like shapes, the center for circles. Vertex
    /// handles have no anchor.
    #[must_use]
    pub fn handle_anchor(&self, index: usize) -> Option<Point> {
        match self.kind {
            ShapeKind::Rect | ShapeKind::Ellipse => {
                let corners = self.handles();
                corners.get((index + 2) % 4).copied().filter(|_| corners.len() == 4)
            }
            ShapeKind::Circle => self.points.first().copied(),
            ShapeKind::Polygon | ShapeKind::Polyline => None,
        }
    }

    // --- Editing ---

    /// Translate every point.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
        self.invalidate();
    }

    /// Drag handle `index` to `p`. Two-point shapes are respanned from
    /// `anchor`; vertex handles move the vertex itself.
    pub fn move_handle(&mut self, index: usize, anchor: Option<Point>, p: Point) {
        match anchor {
            Some(anchor) if self.kind.is_two_point() => self.points = vec![anchor, p],
            _ => {
                if let Some(vertex) = self.points.get_mut(index) {
                    *vertex = p;
                }
            }
        }
        self.invalidate();
    }

    // --- Render path ---

    /// The render path, rebuilt on first access after any geometry change.
    pub fn path(&self) -> &PathData {
        self.path.get_or_init(|| self.build_path())
    }

    fn invalidate(&mut self) {
        self.path = OnceCell::new();
    }

    fn build_path(&self) -> PathData {
        match (self.kind, self.points.as_slice()) {
            (ShapeKind::Rect, [a, b]) => PathData::polyline(&[*a, Point::new(b.x, a.y), *b, Point::new(a.x, b.y)], true),
            (ShapeKind::Circle, [center, rim]) => {
                let r = center.distance(*rim);
                let mut path = PathData::new();
                path.push(PathCommand::Ellipse { center: *center, rx: r, ry: r });
                path
            }
            (ShapeKind::Ellipse, [a, b]) => {
                let mut path = PathData::new();
                path.push(PathCommand::Ellipse {
                    center: Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
                    rx: (b.x - a.x).abs() / 2.0,
                    ry: (b.y - a.y).abs() / 2.0,
                });
                path
            }
            (ShapeKind::Polygon | ShapeKind::Polyline, vertices) if !vertices.is_empty() => {
                let mut pts = vertices.to_vec();
                if let Some(preview) = self.preview {
                    pts.push(preview);
                }
                let closed = self.kind == ShapeKind::Polygon && !self.is_drawing();
                PathData::polyline(&pts, closed)
            }
            _ => PathData::new(),
        }
    }
}
