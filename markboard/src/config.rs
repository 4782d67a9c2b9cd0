//! Board options supplied by the host at mount time.
//!
//! Every field has a default, so a host can pass a partial JSON options bag
//! (camelCase keys, as a browser caller would write them).

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

/// Rendering and interaction options for one board.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoardConfig {
    /// Stroke width in viewport pixels, independent of zoom.
    pub stroke_width: f64,
    /// Stroke color of a shape until the host supplies its own.
    pub draw_color: String,
    /// Fill used to highlight the selected shape.
    pub fill_color: String,
    /// Draw each finished shape's 1-based list index next to it.
    pub show_index_labels: bool,
    /// Ignore the pan gesture (space + drag).
    pub disable_pan: bool,
    /// Ignore modifier + wheel zoom.
    pub disable_zoom: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            stroke_width: 2.0,
            draw_color: "yellow".to_owned(),
            fill_color: "rgba(255, 255, 255, 0.3)".to_owned(),
            show_index_labels: false,
            disable_pan: false,
            disable_zoom: false,
        }
    }
}

impl BoardConfig {
    /// Parse an options bag, filling absent fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
