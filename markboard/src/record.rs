//! Plain-data projection of shapes used at the import/export boundary.
//!
//! Records are what export writers and persistence consume. They carry the
//! canonical point list in image space plus the image's natural resolution at
//! annotation time, so consumers can normalize without asking the board.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};

use crate::shape::ShapeId;
use crate::transform::{Point, Size};

/// Serialized form of one finished shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    pub id: ShapeId,
    #[serde(default)]
    pub label: String,
    /// Variant tag, e.g. `"rect"` or `"polygon"`.
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub color: String,
    pub point_list: Vec<Point>,
    #[serde(default)]
    pub resolution: Size,
}

/// Label and color supplied by the host when a construction completes, or
/// later when relabeling a shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelData {
    pub label: String,
    pub color: String,
}

impl LabelData {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self { label: label.into(), color: color.into() }
    }
}

/// Parse a JSON array of records.
///
/// # Errors
///
/// Returns the `serde_json` error when the input is not an array of records.
pub fn records_from_json(json: &str) -> Result<Vec<ShapeRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize records as a JSON array.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn records_to_json(records: &[ShapeRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}
