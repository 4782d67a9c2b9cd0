//! Annotation canvas engine: draw, edit, select and delete geometric marks
//! over a raster image.
//!
//! The engine owns the view transform, the ordered shape list, the drawing
//! state machine that sequences shape construction, selection arbitration
//! among overlapping shapes, and a synchronous event bus that tells the host
//! what changed. Everything except [`host`] is free of browser dependencies
//! and is tested natively; the host adapter wires a `<canvas>` element and the
//! background image to a [`board::Board`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | The board controller: shape list, selection, gestures |
//! | [`transform`] | Affine pan/zoom transform and fit-to-view layout |
//! | [`shape`] | Shape variants, construction steps and edit operations |
//! | [`hit`] | Geometric containment tests and selection arbitration |
//! | [`path`] | Render path commands (SVG path data) |
//! | [`events`] | Synchronous publish/subscribe bus and event payloads |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`record`] | Plain-data import/export projection of shapes |
//! | [`registry`] | Per-board table from type tag to shape variant |
//! | [`render`] | Full-scene redraw against an abstract 2D surface |
//! | [`host`] | Browser canvas mounting, resize and image loading |
//! | [`config`] | Board options |
//! | [`error`] | Error type |
//! | [`consts`] | Shared numeric constants (zoom limits, tolerances, etc.) |

pub mod board;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod hit;
pub mod host;
pub mod input;
pub mod path;
pub mod record;
pub mod registry;
pub mod render;
pub mod shape;
pub mod transform;
