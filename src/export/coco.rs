//! COCO detection export.
//!
//! Image ids are dataset positions. Category ids follow first-seen label
//! order across the whole dataset. An image's size is taken from the
//! resolution recorded on its first shape, or 0 when it has none.

#[cfg(test)]
#[path = "coco_test.rs"]
mod coco_test;

use markboard::registry::ShapeRegistry;
use serde::Serialize;
use tracing::info;

use super::{LabelIndex, rect_box};
use crate::dataset::ImageAnnotations;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CocoDataset {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
    pub categories: Vec<CocoCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CocoImage {
    pub id: usize,
    pub file_name: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CocoAnnotation {
    pub id: usize,
    pub image_id: usize,
    pub category_id: usize,
    /// `[x, y, width, height]` in absolute pixels.
    pub bbox: [f64; 4],
    pub area: f64,
    pub iscrowd: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CocoCategory {
    pub id: usize,
    pub name: String,
}

#[must_use]
pub fn to_coco(dataset: &[ImageAnnotations], registry: &ShapeRegistry) -> CocoDataset {
    let mut labels = LabelIndex::new();
    let mut images = Vec::with_capacity(dataset.len());
    let mut annotations = Vec::new();

    for (image_id, image) in dataset.iter().enumerate() {
        let resolution = image.shapes.first().map(|s| s.resolution).unwrap_or_default();
        images.push(CocoImage {
            id: image_id,
            file_name: image.image_name.clone(),
            width: resolution.width,
            height: resolution.height,
        });
        for shape in &image.shapes {
            let Some(bbox) = rect_box(shape, registry) else {
                continue;
            };
            annotations.push(CocoAnnotation {
                id: annotations.len(),
                image_id,
                category_id: labels.id_for(&shape.label),
                bbox: [bbox.min_x, bbox.min_y, bbox.width, bbox.height],
                area: bbox.area(),
                iscrowd: 0,
            });
        }
    }

    let categories = labels
        .names()
        .iter()
        .enumerate()
        .map(|(id, name)| CocoCategory { id, name: name.clone() })
        .collect();
    info!(images = images.len(), annotations = annotations.len(), "coco export built");
    CocoDataset { images, annotations, categories }
}

/// Pretty-printed COCO JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_coco_json(dataset: &[ImageAnnotations], registry: &ShapeRegistry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_coco(dataset, registry))
}
