//! YOLO training bundle export.
//!
//! The zip holds `labels/<stem>.txt` per image (one `class cx cy w h` line
//! per rect, normalized by the recorded resolution, six decimals),
//! `classes.txt` with one label per line in class-id order, and `data.yaml`
//! describing the dataset. Entries are deflate-compressed. Images sharing a
//! stem get `labels/<stem>_<id>.txt` after the first.

#[cfg(test)]
#[path = "yolo_test.rs"]
mod yolo_test;

use std::collections::{BTreeMap, HashSet};
use std::io::{Seek, Write};
use std::path::Path;

use markboard::record::ShapeRecord;
use markboard::registry::ShapeRegistry;
use serde::Serialize;
use tracing::{info, warn};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::{LabelIndex, rect_box};
use crate::dataset::ImageAnnotations;
use crate::error::ExportError;

/// The `data.yaml` descriptor.
#[derive(Debug, Serialize)]
pub struct DataYaml {
    pub path: String,
    pub train: String,
    pub val: String,
    pub nc: usize,
    pub names: BTreeMap<usize, String>,
}

impl DataYaml {
    #[must_use]
    pub fn new(labels: &LabelIndex) -> Self {
        Self {
            path: ".".to_owned(),
            train: "images".to_owned(),
            val: "images".to_owned(),
            nc: labels.len(),
            names: labels.names().iter().cloned().enumerate().collect(),
        }
    }
}

/// What went into a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YoloSummary {
    pub label_files: usize,
    pub boxes: usize,
    pub skipped: usize,
    pub classes: usize,
}

fn image_stem(image: &ImageAnnotations) -> String {
    Path::new(&image.image_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("image_{}", image.id))
}

/// Label file name for an image: its file stem with a `.txt` extension.
#[must_use]
pub fn label_file_name(image: &ImageAnnotations) -> String {
    format!("{}.txt", image_stem(image))
}

/// Picks label entry names that are unique within one bundle.
#[derive(Debug, Default)]
pub struct LabelFileNames {
    taken: HashSet<String>,
}

impl LabelFileNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `<stem>.txt`, or `<stem>_<id>.txt` when that is already taken, with a
    /// counter appended if even that collides.
    pub fn claim(&mut self, image: &ImageAnnotations) -> String {
        let mut name = label_file_name(image);
        if self.taken.contains(&name) {
            let base = format!("{}_{}", image_stem(image), image.id);
            name = format!("{base}.txt");
            let mut n = 2;
            while self.taken.contains(&name) {
                name = format!("{base}_{n}.txt");
                n += 1;
            }
            warn!(image = %image.image_name, entry = %name, "label file name taken, renamed");
        }
        self.taken.insert(name.clone());
        name
    }
}

/// One label line, or `None` when the shape is not a rect or its recorded
/// resolution has a zero dimension.
pub fn label_line(shape: &ShapeRecord, registry: &ShapeRegistry, labels: &mut LabelIndex) -> Option<String> {
    let bbox = rect_box(shape, registry)?;
    let (w, h) = (shape.resolution.width, shape.resolution.height);
    if w <= 0.0 || h <= 0.0 {
        warn!(id = shape.id, label = %shape.label, "skipping box with zero image resolution");
        return None;
    }
    let class = labels.id_for(&shape.label);
    let cx = (bbox.min_x + bbox.width / 2.0) / w;
    let cy = (bbox.min_y + bbox.height / 2.0) / h;
    Some(format!("{class} {cx:.6} {cy:.6} {:.6} {:.6}", bbox.width / w, bbox.height / h))
}

/// Write the bundle for `dataset` into `writer`.
///
/// # Errors
///
/// Returns [`ExportError::Zip`] or [`ExportError::Io`] if writing the archive
/// fails and [`ExportError::Yaml`] if the descriptor cannot be encoded.
pub fn write_yolo_zip<W: Write + Seek>(
    dataset: &[ImageAnnotations],
    registry: &ShapeRegistry,
    writer: W,
) -> Result<YoloSummary, ExportError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);
    let mut labels = LabelIndex::new();
    let mut names = LabelFileNames::new();
    let mut summary = YoloSummary::default();

    for image in dataset {
        let rects = image.shapes.iter().filter(|s| rect_box(s, registry).is_some()).count();
        let lines: Vec<String> = image
            .shapes
            .iter()
            .filter_map(|s| label_line(s, registry, &mut labels))
            .collect();
        summary.boxes += lines.len();
        summary.skipped += rects - lines.len();

        zip.start_file(format!("labels/{}", names.claim(image)), options)?;
        zip.write_all(lines.join("\n").as_bytes())?;
        summary.label_files += 1;
    }

    zip.start_file("classes.txt", options)?;
    zip.write_all(labels.names().join("\n").as_bytes())?;

    zip.start_file("data.yaml", options)?;
    zip.write_all(serde_yaml::to_string(&DataYaml::new(&labels))?.as_bytes())?;

    zip.finish()?;
    summary.classes = labels.len();
    info!(
        label_files = summary.label_files,
        boxes = summary.boxes,
        skipped = summary.skipped,
        classes = summary.classes,
        "yolo bundle written"
    );
    Ok(summary)
}
