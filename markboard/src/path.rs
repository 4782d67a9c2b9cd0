//! Render paths for shapes.
//!
//! A [`PathData`] is a short list of drawing commands in image space. Its
//! `Display` impl produces SVG path data, which is what the browser's
//! `Path2D` constructor accepts, so the host can stroke a shape with a single
//! call.

use std::fmt;

use crate::transform::Point;

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Full axis-aligned ellipse around `center`.
    Ellipse { center: Point, rx: f64, ry: f64 },
    Close,
}

/// An ordered list of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An open or closed polyline through `points`.
    #[must_use]
    pub fn polyline(points: &[Point], closed: bool) -> Self {
        let mut path = Self::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.push(PathCommand::MoveTo(*p));
            } else {
                path.push(PathCommand::LineTo(*p));
            }
        }
        if closed && points.len() > 2 {
            path.push(PathCommand::Close);
        }
        path
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for cmd in &self.commands {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match *cmd {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::Ellipse { center, rx, ry } => {
                    // Two half arcs; a single SVG arc cannot describe a full turn.
                    let left = center.x - rx;
                    let right = center.x + rx;
                    write!(
                        f,
                        "M {left} {cy} A {rx} {ry} 0 1 0 {right} {cy} A {rx} {ry} 0 1 0 {left} {cy} Z",
                        cy = center.y
                    )?;
                }
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}
