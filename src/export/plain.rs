//! Plain JSON export: each image's name and shapes, without the board-local
//! shape id and display color.

#[cfg(test)]
#[path = "plain_test.rs"]
mod plain_test;

use markboard::transform::{Point, Size};
use serde::Serialize;

use crate::dataset::ImageAnnotations;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainImage<'a> {
    pub image_name: &'a str,
    pub shapes: Vec<PlainShape<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlainShape<'a> {
    pub label: &'a str,
    #[serde(rename = "type")]
    pub tag: &'a str,
    pub point_list: &'a [Point],
    pub resolution: Size,
}

#[must_use]
pub fn to_plain(dataset: &[ImageAnnotations]) -> Vec<PlainImage<'_>> {
    dataset
        .iter()
        .map(|image| PlainImage {
            image_name: &image.image_name,
            shapes: image
                .shapes
                .iter()
                .map(|s| PlainShape {
                    label: &s.label,
                    tag: &s.tag,
                    point_list: &s.point_list,
                    resolution: s.resolution,
                })
                .collect(),
        })
        .collect()
}

/// Pretty-printed plain JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_plain_json(dataset: &[ImageAnnotations]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&to_plain(dataset))
}
