//! Input model: modifier keys, mouse buttons, keys, and the gesture state
//! machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. It carries what the board needs to compute incremental deltas
//! and to decide, on release, whether the press was a drag, a construction
//! step, or a click that goes to selection arbitration.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::HitPart;
use crate::shape::ShapeId;
use crate::transform::Point;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a modifier that unlocks wheel zoom is held.
    #[must_use]
    pub fn zoom_modifier(self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the physical key code as reported by the browser
/// (e.g. `"Space"`, `"Enter"`, `"Backspace"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == "Space"
    }

    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter" || self.0 == "NumpadEnter"
    }

    #[must_use]
    pub fn is_backspace(&self) -> bool {
        self.0 == "Backspace"
    }

    /// Delete or Backspace.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        self.0 == "Delete" || self.is_backspace()
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Tag of the armed draw type, if any.
    pub draw_type: Option<String>,
    /// The id of the currently selected shape, if any.
    pub selected_id: Option<ShapeId>,
    /// Space is held (or pan mode was set explicitly).
    pub pan_mode: bool,
    /// Last pointer position in image space.
    pub last_pointer: Point,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view while pan mode is active.
    Panning {
        /// Button that started the pan.
        button: Button,
        /// Viewport position of the previous pointer event.
        last_screen: Point,
    },
    /// Sizing a two-point shape by dragging from its anchor.
    Constructing {
        /// Id of the drawing shape.
        id: ShapeId,
    },
    /// A vertex click on a multi-point construction; release does nothing.
    PlacingVertex,
    /// Pressed on an existing shape. Becomes a drag once the pointer moves
    /// past the slop distance; otherwise release is a selection click.
    Pressing {
        /// Shape under the press.
        id: ShapeId,
        /// Body or handle that was hit.
        part: HitPart,
        /// Fixed point for handle drags of two-point shapes.
        anchor: Option<Point>,
        /// Viewport position of the press, for the slop check.
        start_screen: Point,
        /// Image-space pointer position at the previous event.
        last_image: Point,
        /// Whether the press has turned into a drag.
        dragging: bool,
    },
}

impl InputState {
    /// The button that owns the gesture in progress. Construction and shape
    /// presses only start on the primary button.
    #[must_use]
    pub fn button(&self) -> Option<Button> {
        match self {
            Self::Panning { button, .. } => Some(*button),
            Self::Constructing { .. } | Self::Pressing { .. } => Some(Button::Primary),
            Self::Idle | Self::PlacingVertex => None,
        }
    }
}
