//! The dataset file: one entry per annotated image, holding the shape
//! records the board exported for it.

#[cfg(test)]
#[path = "dataset_test.rs"]
mod dataset_test;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use markboard::record::ShapeRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportError;

/// Annotations for one image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnnotations {
    pub id: u64,
    pub image_name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub shapes: Vec<ShapeRecord>,
}

/// Parse a dataset from its JSON text.
///
/// # Errors
///
/// Returns [`ExportError::Json`] when the text is not a dataset array.
pub fn parse_dataset(json: &str) -> Result<Vec<ImageAnnotations>, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a dataset file.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read and
/// [`ExportError::Json`] if it does not parse.
pub fn load_dataset(path: &Path) -> Result<Vec<ImageAnnotations>, ExportError> {
    let text = fs::read_to_string(path)?;
    let dataset = parse_dataset(&text)?;
    info!(path = %path.display(), images = dataset.len(), "dataset loaded");
    Ok(dataset)
}

/// Shape counts for one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSummary {
    pub image_name: String,
    /// Shape count per type tag, sorted by tag.
    pub by_type: BTreeMap<String, usize>,
}

impl ImageSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.by_type.values().sum()
    }
}

#[must_use]
pub fn summarize(dataset: &[ImageAnnotations]) -> Vec<ImageSummary> {
    dataset
        .iter()
        .map(|image| {
            let mut by_type = BTreeMap::new();
            for shape in &image.shapes {
                *by_type.entry(shape.tag.clone()).or_insert(0) += 1;
            }
            ImageSummary { image_name: image.image_name.clone(), by_type }
        })
        .collect()
}

/// Distinct labels across the dataset, in first-seen order.
#[must_use]
pub fn labels(dataset: &[ImageAnnotations]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for shape in dataset.iter().flat_map(|image| &image.shapes) {
        if !seen.contains(&shape.label) {
            seen.push(shape.label.clone());
        }
    }
    seen
}
