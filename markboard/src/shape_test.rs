#![allow(clippy::float_cmp)]

use super::*;

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn drag(kind: ShapeKind, a: Point, b: Point) -> Shape {
    let mut shape = Shape::new(1, kind.tag(), kind, "yellow");
    shape.begin(a);
    shape.extend(b);
    shape
}

fn clicks(kind: ShapeKind, points: &[Point]) -> Shape {
    let mut shape = Shape::new(1, kind.tag(), kind, "yellow");
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            shape.begin(*p);
        } else {
            shape.add_vertex(*p);
        }
    }
    shape
}

fn done(mut shape: Shape) -> Shape {
    shape.finalize(LabelData::new("cat", "red"));
    shape
}

// =============================================================
// Kind
// =============================================================

#[test]
fn kind_tags_and_arity() {
    assert_eq!(ShapeKind::Rect.tag(), "rect");
    assert_eq!(ShapeKind::Polyline.tag(), "polyline");
    assert!(ShapeKind::Circle.is_two_point());
    assert!(!ShapeKind::Polygon.is_two_point());
    assert_eq!(ShapeKind::Polygon.min_points(), 3);
    assert_eq!(ShapeKind::Polyline.min_points(), 2);
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn new_shape_is_armed_not_under_construction() {
    let shape = Shape::new(7, "rect", ShapeKind::Rect, "yellow");
    assert!(shape.is_drawing());
    assert!(!shape.is_under_construction());
    assert!(shape.points().is_empty());
    assert!(shape.path().is_empty());
}

#[test]
fn begin_two_point_starts_collapsed() {
    let mut shape = Shape::new(1, "rect", ShapeKind::Rect, "yellow");
    shape.begin(pt(3.0, 4.0));
    assert_eq!(shape.points(), &[pt(3.0, 4.0), pt(3.0, 4.0)]);
    assert!(shape.is_under_construction());
}

#[test]
fn finalize_stamps_label_and_status() {
    let shape = done(drag(ShapeKind::Rect, pt(0.0, 0.0), pt(10.0, 10.0)));
    assert_eq!(shape.status(), ShapeStatus::Normal);
    assert_eq!(shape.label(), "cat");
    assert_eq!(shape.color(), "red");
    assert!(!shape.is_under_construction());
}

// =============================================================
// Completion rules
// =============================================================

#[test]
fn zero_width_or_height_rect_is_degenerate() {
    assert!(drag(ShapeKind::Rect, pt(10.0, 10.0), pt(10.0, 10.0)).is_degenerate());
    assert!(drag(ShapeKind::Rect, pt(10.0, 10.0), pt(10.0, 40.0)).is_degenerate());
    assert!(drag(ShapeKind::Ellipse, pt(10.0, 10.0), pt(40.0, 10.0)).is_degenerate());
    assert!(!drag(ShapeKind::Rect, pt(10.0, 10.0), pt(50.0, 40.0)).is_degenerate());
}

#[test]
fn circle_degenerate_only_at_zero_radius() {
    assert!(drag(ShapeKind::Circle, pt(10.0, 10.0), pt(10.0, 10.0)).is_degenerate());
    assert!(!drag(ShapeKind::Circle, pt(10.0, 10.0), pt(10.0, 20.0)).is_degenerate());
}

#[test]
fn polygon_needs_three_vertices_to_complete() {
    let two = clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(10.0, 0.0)]);
    assert!(!two.can_complete());
    let three = clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]);
    assert!(three.can_complete());
}

#[test]
fn polyline_needs_two_vertices_to_complete() {
    assert!(!clicks(ShapeKind::Polyline, &[pt(0.0, 0.0)]).can_complete());
    assert!(clicks(ShapeKind::Polyline, &[pt(0.0, 0.0), pt(5.0, 5.0)]).can_complete());
}

#[test]
fn polygon_closes_near_first_vertex() {
    let shape = clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]);
    assert!(shape.closes_at(pt(3.0, 4.0), 8.0));
    assert!(!shape.closes_at(pt(30.0, 40.0), 8.0));
}

#[test]
fn polygon_does_not_close_before_three_vertices() {
    let shape = clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(100.0, 0.0)]);
    assert!(!shape.closes_at(pt(0.0, 0.0), 8.0));
}

#[test]
fn polyline_never_closes() {
    let shape = clicks(ShapeKind::Polyline, &[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]);
    assert!(!shape.closes_at(pt(0.0, 0.0), 8.0));
}

#[test]
fn remove_last_vertex_counts_down_to_empty() {
    let mut shape = clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(10.0, 0.0)]);
    shape.extend(pt(5.0, 5.0));
    assert_eq!(shape.remove_last_vertex(), 1);
    assert_eq!(shape.preview(), Some(pt(5.0, 5.0)));
    assert_eq!(shape.remove_last_vertex(), 0);
    assert_eq!(shape.preview(), None);
    assert!(!shape.is_under_construction());
}

// =============================================================
// Containment
// =============================================================

#[test]
fn rect_contains() {
    let shape = done(drag(ShapeKind::Rect, pt(10.0, 10.0), pt(50.0, 40.0)));
    assert!(shape.contains(pt(30.0, 20.0), 5.0));
    assert!(!shape.contains(pt(5.0, 5.0), 5.0));
}

#[test]
fn rect_contains_when_dragged_backwards() {
    let shape = done(drag(ShapeKind::Rect, pt(50.0, 40.0), pt(10.0, 10.0)));
    assert!(shape.contains(pt(30.0, 20.0), 5.0));
}

#[test]
fn circle_contains_by_rim_distance() {
    let shape = done(drag(ShapeKind::Circle, pt(0.0, 0.0), pt(30.0, 40.0)));
    assert!(shape.contains(pt(0.0, 49.0), 5.0));
    assert!(!shape.contains(pt(0.0, 51.0), 5.0));
}

#[test]
fn polyline_contains_only_near_segments() {
    let shape = done(clicks(ShapeKind::Polyline, &[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]));
    assert!(shape.contains(pt(50.0, 3.0), 5.0));
    assert!(!shape.contains(pt(50.0, 50.0), 5.0));
}

#[test]
fn polygon_contains_interior() {
    let shape = done(clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 100.0)]));
    assert!(shape.contains(pt(80.0, 20.0), 5.0));
    assert!(!shape.contains(pt(20.0, 80.0), 5.0));
}

// =============================================================
// Result points / bounds
// =============================================================

#[test]
fn result_points_normalize_box_corners() {
    let shape = done(drag(ShapeKind::Rect, pt(50.0, 10.0), pt(10.0, 40.0)));
    assert_eq!(shape.result_points(), vec![pt(10.0, 10.0), pt(50.0, 40.0)]);
    // Raw points keep input order.
    assert_eq!(shape.points()[0], pt(50.0, 10.0));
}

#[test]
fn result_points_circle_keeps_center_and_rim() {
    let shape = done(drag(ShapeKind::Circle, pt(5.0, 5.0), pt(1.0, 2.0)));
    assert_eq!(shape.result_points(), vec![pt(5.0, 5.0), pt(1.0, 2.0)]);
}

#[test]
fn circle_bounds_span_radius() {
    let shape = done(drag(ShapeKind::Circle, pt(10.0, 10.0), pt(10.0, 15.0)));
    assert_eq!(shape.bounds(), Some((pt(5.0, 5.0), pt(15.0, 15.0))));
    assert_eq!(shape.index_point(), pt(5.0, 5.0));
}

#[test]
fn to_record_uses_result_points_and_resolution() {
    let shape = done(drag(ShapeKind::Ellipse, pt(40.0, 40.0), pt(0.0, 0.0)));
    let record = shape.to_record(Size::new(640.0, 480.0));
    assert_eq!(record.tag, "ellipse");
    assert_eq!(record.label, "cat");
    assert_eq!(record.point_list, vec![pt(0.0, 0.0), pt(40.0, 40.0)]);
    assert_eq!(record.resolution, Size::new(640.0, 480.0));
    let back = Shape::from_record(&record, ShapeKind::Ellipse);
    assert_eq!(back.status(), ShapeStatus::Normal);
    assert_eq!(back.points(), record.point_list.as_slice());
}

// =============================================================
// Handles and editing
// =============================================================

#[test]
fn rect_handles_and_opposite_anchor() {
    let shape = done(drag(ShapeKind::Rect, pt(0.0, 0.0), pt(100.0, 50.0)));
    assert_eq!(shape.handles(), vec![pt(0.0, 0.0), pt(100.0, 0.0), pt(100.0, 50.0), pt(0.0, 50.0)]);
    assert_eq!(shape.handle_anchor(0), Some(pt(100.0, 50.0)));
    assert_eq!(shape.handle_anchor(1), Some(pt(0.0, 50.0)));
    assert_eq!(shape.handle_at(pt(98.0, 3.0), 6.0), Some(1));
    assert_eq!(shape.handle_at(pt(50.0, 25.0), 6.0), None);
}

#[test]
fn circle_handle_is_rim_anchored_at_center() {
    let shape = done(drag(ShapeKind::Circle, pt(10.0, 10.0), pt(20.0, 10.0)));
    assert_eq!(shape.handles(), vec![pt(20.0, 10.0)]);
    assert_eq!(shape.handle_anchor(0), Some(pt(10.0, 10.0)));
}

#[test]
fn move_handle_respans_box_from_anchor() {
    let mut shape = done(drag(ShapeKind::Rect, pt(0.0, 0.0), pt(100.0, 50.0)));
    let anchor = shape.handle_anchor(2);
    shape.move_handle(2, anchor, pt(120.0, 80.0));
    assert_eq!(shape.result_points(), vec![pt(0.0, 0.0), pt(120.0, 80.0)]);
}

#[test]
fn move_handle_moves_polygon_vertex() {
    let mut shape = done(clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]));
    shape.move_handle(1, None, pt(20.0, 0.0));
    assert_eq!(shape.points()[1], pt(20.0, 0.0));
}

#[test]
fn move_by_translates_every_point() {
    let mut shape = done(clicks(ShapeKind::Polyline, &[pt(0.0, 0.0), pt(10.0, 5.0)]));
    shape.move_by(3.0, -2.0);
    assert_eq!(shape.points(), &[pt(3.0, -2.0), pt(13.0, 3.0)]);
}

// =============================================================
// Render path
// =============================================================

#[test]
fn rect_path_svg() {
    let shape = done(drag(ShapeKind::Rect, pt(10.0, 10.0), pt(50.0, 40.0)));
    assert_eq!(shape.path().to_string(), "M 10 10 L 50 10 L 50 40 L 10 40 Z");
}

#[test]
fn circle_path_is_two_arcs() {
    let shape = done(drag(ShapeKind::Circle, pt(10.0, 10.0), pt(10.0, 15.0)));
    assert_eq!(shape.path().to_string(), "M 5 10 A 5 5 0 1 0 15 10 A 5 5 0 1 0 5 10 Z");
}

#[test]
fn drawing_polygon_path_open_with_preview() {
    let mut shape = clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]);
    shape.extend(pt(0.0, 10.0));
    assert_eq!(shape.path().to_string(), "M 0 0 L 10 0 L 10 10 L 0 10");
}

#[test]
fn finished_polygon_path_closed() {
    let shape = done(clicks(ShapeKind::Polygon, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]));
    assert_eq!(shape.path().to_string(), "M 0 0 L 10 0 L 10 10 Z");
}

#[test]
fn polyline_path_stays_open() {
    let shape = done(clicks(ShapeKind::Polyline, &[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]));
    assert!(!shape.path().to_string().ends_with('Z'));
}

#[test]
fn path_rebuilt_after_geometry_change() {
    let mut shape = done(drag(ShapeKind::Rect, pt(0.0, 0.0), pt(10.0, 10.0)));
    let before = shape.path().clone();
    shape.move_by(5.0, 0.0);
    let after = shape.path();
    assert_ne!(&before, after);
    assert_eq!(after.commands()[0], PathCommand::MoveTo(pt(5.0, 0.0)));
}
