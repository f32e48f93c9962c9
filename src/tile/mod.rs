//! Tile abstraction: the `Tilespec` contract and the sequence types a load
//! produces.
//!
//! Every storage backend materializes its tiles behind the [`Tilespec`]
//! trait, so consumers can enumerate tiles and read pixel regions without
//! knowing which backend produced them. Loads return a [`Dataset`] of
//! [`Section`]s; each section is a lazy, single-pass sequence of tiles.

mod dataset;
mod tilespec;

pub use dataset::{BoxedTile, Dataset, Section};
pub use tilespec::{Tilespec, Transform};
