//! Dataset and Section sequence types.
//!
//! A load produces a [`Dataset`]: an ordered sequence of [`Section`]s, one
//! per manifest, each yielding the manifest's tiles. Sections are lazy and
//! single-pass: tile objects materialize as the caller iterates, and
//! re-iterating after exhaustion does not re-open the source.

use super::tilespec::Tilespec;

/// A boxed tile, as produced by any backend.
pub type BoxedTile = Box<dyn Tilespec>;

// =============================================================================
// Section
// =============================================================================

/// One manifest's worth of tiles, in load order.
///
/// Sections carry no enforced invariant beyond being returned together by
/// one manifest; in practice all tiles in a section share the same layer.
/// The sequence is single-pass — consume it once.
pub struct Section {
    tiles: Box<dyn Iterator<Item = BoxedTile> + Send>,
}

impl Section {
    /// Wrap a tile iterator as a section.
    pub fn new(tiles: Box<dyn Iterator<Item = BoxedTile> + Send>) -> Self {
        Self { tiles }
    }

    /// Build a section from already-materialized tiles.
    pub fn from_tiles(tiles: Vec<BoxedTile>) -> Self {
        Self {
            tiles: Box::new(tiles.into_iter()),
        }
    }
}

impl Iterator for Section {
    type Item = BoxedTile;

    fn next(&mut self) -> Option<Self::Item> {
        self.tiles.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.tiles.size_hint()
    }
}

impl std::fmt::Debug for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section").finish_non_exhaustive()
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// The result of one load call: a sequence of sections.
///
/// A dataset has no persistent identity — it exists only as the return value
/// of one load; nothing is cached or retained between calls. Section order
/// follows the source's listing order and is not semantically meaningful.
#[derive(Debug)]
pub struct Dataset {
    sections: Vec<Section>,
}

impl Dataset {
    /// Wrap a sequence of sections.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// An empty dataset. The registry treats this the same as a decline.
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the dataset has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Consume the dataset, yielding its sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

impl IntoIterator for Dataset {
    type Item = Section;
    type IntoIter = std::vec::IntoIter<Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.into_iter()
    }
}

// =============================================================================
// Tests
// =============================================================================
