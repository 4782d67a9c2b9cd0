//! Affine view transform: maps image space (where shape geometry is stored)
//! to viewport space (where pointer events arrive), plus the fit-to-view
//! layout used when an image is loaded or the viewport resizes.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN};

/// A point in either viewport or image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height in pixels. Used for the viewport and for an image's
/// natural resolution.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// A 2D affine matrix in canvas `setTransform` order.
///
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
///
/// Every public operation keeps the matrix a uniform scale plus translation,
/// so `a == d > 0` and `b == c == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[must_use]
    pub fn identity() -> Self {
        Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 }
    }

    /// A pure uniform scale plus translation.
    #[must_use]
    pub fn from_layout(zoom: f64, offset_x: f64, offset_y: f64) -> Self {
        Self { a: zoom, b: 0.0, c: 0.0, d: zoom, e: offset_x, f: offset_y }
    }

    /// Current zoom factor (image pixels → viewport pixels).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.a
    }

    /// Matrix product `self × rhs`: the result applies `rhs` first, then `self`.
    #[must_use]
    pub fn multiply(&self, rhs: &Transform) -> Transform {
        Transform {
            a: self.a * rhs.a + self.c * rhs.b,
            b: self.b * rhs.a + self.d * rhs.b,
            c: self.a * rhs.c + self.c * rhs.d,
            d: self.b * rhs.c + self.d * rhs.d,
            e: self.a * rhs.e + self.c * rhs.f + self.e,
            f: self.b * rhs.e + self.d * rhs.f + self.f,
        }
    }

    /// Rescale uniformly about a viewport point, keeping that point fixed.
    ///
    /// Non-finite or non-positive factors are ignored. The resulting zoom is
    /// clamped to [`ZOOM_MIN`]..=[`ZOOM_MAX`].
    pub fn scale_around(&mut self, center: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let target = (self.a * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        let factor = target / self.a;
        let op = Transform {
            a: factor,
            b: 0.0,
            c: 0.0,
            d: factor,
            e: center.x * (1.0 - factor),
            f: center.y * (1.0 - factor),
        };
        *self = op.multiply(self);
    }

    /// Pan by a viewport-space delta.
    pub fn translate_by(&mut self, dx: f64, dy: f64) {
        let op = Transform::from_layout(1.0, dx, dy);
        *self = op.multiply(self);
    }

    /// Replace the transform with a uniform scale plus offset.
    pub fn reset(&mut self, zoom: f64, offset_x: f64, offset_y: f64) {
        *self = Transform::from_layout(zoom, offset_x, offset_y);
    }

    /// Apply the transform: image space → viewport space.
    #[must_use]
    pub fn map_to_viewport(&self, image: Point) -> Point {
        Point {
            x: self.a * image.x + self.c * image.y + self.e,
            y: self.b * image.x + self.d * image.y + self.f,
        }
    }

    /// Apply the inverse transform: viewport space → image space.
    ///
    /// This is the only way raw pointer coordinates become stored geometry.
    #[must_use]
    pub fn map_to_image_space(&self, viewport: Point) -> Point {
        let det = self.a * self.d - self.b * self.c;
        if det == 0.0 {
            return viewport;
        }
        let px = viewport.x - self.e;
        let py = viewport.y - self.f;
        Point {
            x: (self.d * px - self.c * py) / det,
            y: (self.a * py - self.b * px) / det,
        }
    }

    /// Convert a viewport-space distance to image-space distance.
    #[must_use]
    pub fn viewport_dist_to_image(&self, dist: f64) -> f64 {
        dist / self.a
    }
}

/// The transform that fits an image inside the viewport, centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitLayout {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for FitLayout {
    fn default() -> Self {
        Self { zoom: 1.0, offset_x: 0.0, offset_y: 0.0 }
    }
}

impl FitLayout {
    /// Compute the fit layout, or `None` when either size is empty.
    #[must_use]
    pub fn compute(viewport: Size, image: Size) -> Option<Self> {
        if !viewport.is_positive() || !image.is_positive() {
            return None;
        }
        let zoom = (viewport.width / image.width).min(viewport.height / image.height);
        Some(Self {
            zoom,
            offset_x: (viewport.width - image.width * zoom) / 2.0,
            offset_y: (viewport.height - image.height * zoom) / 2.0,
        })
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform::from_layout(self.zoom, self.offset_x, self.offset_y)
    }
}
