//! Rendering: draws the full board scene to a 2D surface.
//!
//! Every call is a full redraw: clear, background image, every shape in list
//! order, then the selection highlight and index labels. Nothing here mutates
//! board state.
//!
//! The drawing target is abstracted behind [`Surface`] so the scene logic is
//! tested natively; the browser implementation lives in [`crate::host`].
//! Shape geometry is in image space, so the surface transform is set to the
//! board transform once and widths and font sizes are divided by the zoom to
//! stay constant on screen.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::board::Board;
use crate::config::BoardConfig;
use crate::consts::{HANDLE_RADIUS_PX, LABEL_FONT_PX, LABEL_OFFSET_PX};
use crate::path::{PathCommand, PathData};
use crate::shape::Shape;
use crate::transform::{Point, Size, Transform};

/// A 2D drawing target.
pub trait Surface {
    type Error;

    /// Clear the whole viewport (in untransformed viewport pixels).
    fn clear(&mut self, viewport: Size) -> Result<(), Self::Error>;
    fn set_transform(&mut self, transform: &Transform) -> Result<(), Self::Error>;
    /// Draw the background image at the image-space origin at natural size.
    fn draw_background(&mut self, size: Size) -> Result<(), Self::Error>;
    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_color(&mut self, color: &str);
    fn set_font(&mut self, font: &str);
    fn stroke_path(&mut self, path: &PathData) -> Result<(), Self::Error>;
    fn fill_path(&mut self, path: &PathData) -> Result<(), Self::Error>;
    fn fill_text(&mut self, text: &str, at: Point) -> Result<(), Self::Error>;
}

/// Draw the full scene.
///
/// # Errors
///
/// Returns the surface's error if any drawing call fails.
pub fn draw<S: Surface>(surface: &mut S, board: &Board) -> Result<(), S::Error> {
    let config = board.config();
    let transform = board.transform();
    let zoom = transform.zoom();

    surface.clear(board.viewport())?;
    surface.set_transform(&transform)?;
    if let Some(background) = board.background() {
        surface.draw_background(background.size)?;
    }

    surface.set_line_width(config.stroke_width / zoom);
    for shape in board.shapes() {
        draw_shape(surface, shape, config)?;
    }

    if let Some(shape) = board.selection().and_then(|id| board.shape(id)) {
        draw_selection(surface, shape, config, zoom)?;
    }

    if config.show_index_labels {
        draw_index_labels(surface, board.shapes(), config, zoom)?;
    }
    Ok(())
}

/// Color a shape is stroked in.
#[must_use]
pub fn stroke_color<'a>(shape: &'a Shape, config: &'a BoardConfig) -> &'a str {
    if shape.is_drawing() || shape.color().is_empty() {
        &config.draw_color
    } else {
        shape.color()
    }
}

fn draw_shape<S: Surface>(surface: &mut S, shape: &Shape, config: &BoardConfig) -> Result<(), S::Error> {
    let path = shape.path();
    if path.is_empty() {
        return Ok(());
    }
    surface.set_stroke_color(stroke_color(shape, config));
    surface.stroke_path(path)
}

fn draw_selection<S: Surface>(surface: &mut S, shape: &Shape, config: &BoardConfig, zoom: f64) -> Result<(), S::Error> {
    surface.set_fill_color(&config.fill_color);
    surface.fill_path(shape.path())?;

    let radius = HANDLE_RADIUS_PX / 2.0 / zoom;
    let mut grips = PathData::new();
    for center in shape.handles() {
        grips.push(PathCommand::Ellipse { center, rx: radius, ry: radius });
    }
    if grips.is_empty() {
        return Ok(());
    }
    surface.set_fill_color(stroke_color(shape, config));
    surface.fill_path(&grips)
}

fn draw_index_labels<S: Surface>(surface: &mut S, shapes: &[Shape], config: &BoardConfig, zoom: f64) -> Result<(), S::Error> {
    surface.set_font(&format!("{}px sans-serif", LABEL_FONT_PX / zoom));
    let offset = LABEL_OFFSET_PX / zoom;
    for (i, shape) in shapes.iter().filter(|s| !s.is_drawing()).enumerate() {
        let anchor = shape.index_point();
        surface.set_fill_color(stroke_color(shape, config));
        surface.fill_text(&(i + 1).to_string(), Point::new(anchor.x, anchor.y - offset))?;
    }
    Ok(())
}
