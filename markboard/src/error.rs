//! Error type for the markboard crate.
//!
//! Only configuration and unsupported-type failures surface as errors.
//! Degenerate shapes, unknown ids and unexpected input are silent no-ops.

/// Errors raised by the board and its host adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// The mount target is missing or unusable. The engine does not start.
    #[error("invalid mount target: {0}")]
    Configuration(String),
    /// A draw type or imported record names a tag with no registered variant.
    #[error("`{0}` mark type is not supported")]
    UnsupportedShapeType(String),
    /// A variant registration used an empty tag.
    #[error("shape variant tag must not be empty")]
    EmptyShapeTag,
    /// A browser call failed (image decode, canvas context, etc.).
    #[error("host error: {0}")]
    Host(String),
}
