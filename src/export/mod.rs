//! Export projections over a dataset.
//!
//! | Module | Output |
//! |--------|--------|
//! | [`plain`] | The dataset as JSON with board-internal fields stripped |
//! | [`coco`] | COCO detection JSON (rect shapes only) |
//! | [`yolo`] | YOLO training bundle as a zip (rect shapes only) |
//!
//! COCO and YOLO only carry axis-aligned boxes, so they read records whose
//! type resolves to [`ShapeKind::Rect`] and ignore every other type. Tags are
//! resolved through a [`ShapeRegistry`], so an alias registered on the board
//! must be registered here too.


pub mod coco;
pub mod plain;
pub mod yolo;

use markboard::record::ShapeRecord;
use markboard::registry::ShapeRegistry;
use markboard::shape::ShapeKind;

/// Dense class ids assigned to labels in first-seen order, starting at 0.
#[derive(Debug, Default)]
pub struct LabelIndex {
    names: Vec<String>,
}

impl LabelIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The id for `label`, assigning the next one on first sight.
    pub fn id_for(&mut self, label: &str) -> usize {
        if let Some(id) = self.names.iter().position(|n| n == label) {
            return id;
        }
        self.names.push(label.to_owned());
        self.names.len() - 1
    }

    /// Labels in id order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Axis-aligned box in image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// The box of a record whose tag resolves to a rect, or `None` for any other
/// or unknown type and for a record without two corners.
#[must_use]
pub fn rect_box(record: &ShapeRecord, registry: &ShapeRegistry) -> Option<BoundingBox> {
    if !matches!(registry.resolve(&record.tag), Ok(ShapeKind::Rect)) {
        return None;
    }
    let [a, b] = record.point_list.as_slice() else {
        return None;
    };
    Some(BoundingBox {
        min_x: a.x.min(b.x),
        min_y: a.y.min(b.y),
        width: (b.x - a.x).abs(),
        height: (b.y - a.y).abs(),
    })
}
