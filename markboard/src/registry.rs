//! Per-board table from type tag to shape variant.
//!
//! Each board owns its own registry, so registering an alias on one board
//! never leaks into another.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use crate::error::BoardError;
use crate::shape::ShapeKind;

/// Tag → variant lookup table.
#[derive(Debug, Clone)]
pub struct ShapeRegistry {
    entries: HashMap<String, ShapeKind>,
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        let entries = ShapeKind::ALL.iter().map(|k| (k.tag().to_owned(), *k)).collect();
        Self { entries }
    }
}

impl ShapeRegistry {
    /// A registry holding the built-in variants under their canonical tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Add or replace the variant behind `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyShapeTag`] for an empty or blank tag.
    pub fn register(&mut self, tag: &str, kind: ShapeKind) -> Result<(), BoardError> {
        if tag.trim().is_empty() {
            return Err(BoardError::EmptyShapeTag);
        }
        self.entries.insert(tag.to_owned(), kind);
        Ok(())
    }

    /// Look up the variant for `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnsupportedShapeType`] when nothing is registered.
    pub fn resolve(&self, tag: &str) -> Result<ShapeKind, BoardError> {
        self.entries
            .get(tag)
            .copied()
            .ok_or_else(|| BoardError::UnsupportedShapeType(tag.to_owned()))
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Registered tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
