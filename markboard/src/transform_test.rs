#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

// --- Size ---

#[test]
fn size_is_positive() {
    assert!(Size::new(10.0, 5.0).is_positive());
    assert!(!Size::new(0.0, 5.0).is_positive());
    assert!(!Size::new(10.0, f64::NAN).is_positive());
}

// --- Transform defaults ---

#[test]
fn transform_default_is_identity() {
    let t = Transform::default();
    assert_eq!(t, Transform::identity());
    assert_eq!(t.zoom(), 1.0);
}

#[test]
fn identity_maps_points_unchanged() {
    let t = Transform::identity();
    let p = Point::new(12.5, -7.0);
    assert!(point_approx_eq(t.map_to_image_space(p), p));
    assert!(point_approx_eq(t.map_to_viewport(p), p));
}

// --- multiply ---

#[test]
fn multiply_applies_rhs_first() {
    let scale = Transform::from_layout(2.0, 0.0, 0.0);
    let shift = Transform::from_layout(1.0, 10.0, 0.0);
    // shift then scale: (x + 10) * 2
    let composed = scale.multiply(&shift);
    let out = composed.map_to_viewport(Point::new(1.0, 1.0));
    assert!(point_approx_eq(out, Point::new(22.0, 2.0)));
}

#[test]
fn multiply_by_identity_is_noop() {
    let t = Transform::from_layout(3.0, 4.0, 5.0);
    assert_eq!(t.multiply(&Transform::identity()), t);
    assert_eq!(Transform::identity().multiply(&t), t);
}

// --- scale_around ---

#[test]
fn scale_around_keeps_center_fixed() {
    let mut t = Transform::from_layout(1.5, 20.0, -10.0);
    let center = Point::new(100.0, 80.0);
    let before = t.map_to_image_space(center);
    t.scale_around(center, 1.1);
    let after = t.map_to_image_space(center);
    assert!(point_approx_eq(before, after));
    assert!(approx_eq(t.zoom(), 1.65));
}

#[test]
fn scale_around_stays_uniform() {
    let mut t = Transform::identity();
    t.scale_around(Point::new(5.0, 9.0), 0.9);
    t.scale_around(Point::new(50.0, 1.0), 1.1);
    assert!(approx_eq(t.a, t.d));
    assert_eq!(t.b, 0.0);
    assert_eq!(t.c, 0.0);
}

#[test]
fn scale_around_ignores_bad_factors() {
    let mut t = Transform::from_layout(2.0, 1.0, 1.0);
    t.scale_around(Point::new(0.0, 0.0), 0.0);
    t.scale_around(Point::new(0.0, 0.0), -1.0);
    t.scale_around(Point::new(0.0, 0.0), f64::NAN);
    assert_eq!(t, Transform::from_layout(2.0, 1.0, 1.0));
}

#[test]
fn scale_around_clamps_zoom() {
    let mut t = Transform::identity();
    for _ in 0..200 {
        t.scale_around(Point::new(0.0, 0.0), 1.1);
    }
    assert!(approx_eq(t.zoom(), ZOOM_MAX));
    for _ in 0..400 {
        t.scale_around(Point::new(0.0, 0.0), 0.9);
    }
    assert!(approx_eq(t.zoom(), ZOOM_MIN));
}

// --- translate_by / reset ---

#[test]
fn translate_by_shifts_viewport_mapping() {
    let mut t = Transform::from_layout(2.0, 0.0, 0.0);
    t.translate_by(10.0, -4.0);
    let out = t.map_to_viewport(Point::new(1.0, 1.0));
    assert!(point_approx_eq(out, Point::new(12.0, -2.0)));
}

#[test]
fn reset_replaces_matrix() {
    let mut t = Transform::from_layout(3.0, 9.0, 9.0);
    t.reset(0.5, 1.0, 2.0);
    assert_eq!(t, Transform::from_layout(0.5, 1.0, 2.0));
}

// --- mapping round trips ---

#[test]
fn image_viewport_round_trip() {
    let mut t = Transform::from_layout(0.75, 33.0, 12.0);
    t.scale_around(Point::new(40.0, 40.0), 1.1);
    t.translate_by(-5.0, 7.5);
    let p = Point::new(123.0, 456.0);
    assert!(point_approx_eq(t.map_to_image_space(t.map_to_viewport(p)), p));
}

#[test]
fn map_to_image_space_inverts_zoom_and_offset() {
    let t = Transform::from_layout(4.0, 100.0, 200.0);
    let image = t.map_to_image_space(Point::new(140.0, 280.0));
    assert!(point_approx_eq(image, Point::new(10.0, 20.0)));
}

#[test]
fn viewport_dist_to_image_divides_by_zoom() {
    let t = Transform::from_layout(4.0, 0.0, 0.0);
    assert!(approx_eq(t.viewport_dist_to_image(8.0), 2.0));
}

// --- FitLayout ---

#[test]
fn fit_layout_letterboxes_wide_viewport() {
    let fit = FitLayout::compute(Size::new(800.0, 400.0), Size::new(200.0, 200.0)).expect("fit");
    assert!(approx_eq(fit.zoom, 2.0));
    assert!(approx_eq(fit.offset_x, 200.0));
    assert!(approx_eq(fit.offset_y, 0.0));
}

#[test]
fn fit_layout_shrinks_large_image() {
    let fit = FitLayout::compute(Size::new(400.0, 300.0), Size::new(1600.0, 900.0)).expect("fit");
    assert!(approx_eq(fit.zoom, 0.25));
    assert!(approx_eq(fit.offset_x, 0.0));
    assert!(approx_eq(fit.offset_y, (300.0 - 225.0) / 2.0));
}

#[test]
fn fit_layout_rejects_empty_sizes() {
    assert!(FitLayout::compute(Size::new(0.0, 300.0), Size::new(10.0, 10.0)).is_none());
    assert!(FitLayout::compute(Size::new(300.0, 300.0), Size::new(10.0, 0.0)).is_none());
}

#[test]
fn fit_layout_transform_matches_fields() {
    let fit = FitLayout { zoom: 2.0, offset_x: 3.0, offset_y: 4.0 };
    assert_eq!(fit.transform(), Transform::from_layout(2.0, 3.0, 4.0));
}
