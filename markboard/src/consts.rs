//! Shared numeric constants for the markboard crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.01;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 100.0;

/// Multiplicative zoom step for one wheel tick towards the user.
pub const ZOOM_IN_STEP: f64 = 1.1;

/// Multiplicative zoom step for one wheel tick away from the user.
pub const ZOOM_OUT_STEP: f64 = 0.9;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space grab radius in pixels for vertex and corner handles.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

/// Screen-space distance to the first vertex that closes a polygon.
pub const CLOSE_TOLERANCE_PX: f64 = 8.0;

/// Half-width in screen pixels of the corridor that counts as "on" a polyline.
pub const POLYLINE_HIT_PX: f64 = 5.0;

/// Pointer travel in screen pixels before a press turns into a drag.
pub const DRAG_SLOP_PX: f64 = 2.0;

// ── Shape ids ───────────────────────────────────────────────────

/// Largest record id kept on import: the largest integer a JavaScript number
/// holds exactly. Larger ids are reassigned.
pub const MAX_RECORD_ID: u64 = (1 << 53) - 1;

// ── Rendering ───────────────────────────────────────────────────

/// Index label font size in screen pixels.
pub const LABEL_FONT_PX: f64 = 14.0;

/// Gap in screen pixels between a shape's anchor and its index label.
pub const LABEL_OFFSET_PX: f64 = 4.0;
