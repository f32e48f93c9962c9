//! # Tilespec
//!
//! A data-access layer for large, tiled microscopy image datasets.
//!
//! This library provides per-tile metadata (position, size, intensity range,
//! coordinate-transform chain) plus on-demand, resolution-aware pixel access.
//! Stitching and rendering pipelines get a uniform way to enumerate tiles
//! across heterogeneous storage backends without knowing which backend
//! produced a given tile.
//!
//! ## Features
//!
//! - **Backend resolution**: an opaque path is matched to exactly one of
//!   several registered loader backends — first success wins
//! - **Mipmap-aware reads**: region reads select the cheapest stored pyramid
//!   level and finish the remaining decimation by strided sampling
//! - **Remote images**: tile images referenced by URL are fetched into
//!   scope-guarded temporary files and cleaned up after the read
//! - **Lazy sections**: manifests materialize tile objects on demand as the
//!   caller iterates
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`boundingbox`] - 2-D axis-aligned rectangle value type
//! - [`tile`] - the `Tilespec` contract and the `Dataset`/`Section` types
//! - [`mod@backend`] - concrete backends (JSON tilespec manifests)
//! - [`loader`] - the backend registry and selection policy
//! - [`io`] - locator resolution and the grayscale decode boundary
//! - [`error`] - layered error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use tilespec::{BoundingBox, LoaderRegistry, Tilespec};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = LoaderRegistry::with_default_backends();
//!
//!     // A directory of per-section manifests, or a single manifest file.
//!     let dataset = registry.load("/data/w01/tilespecs".as_ref())?;
//!
//!     for section in dataset {
//!         for tile in section {
//!             // Quarter-resolution read of a window of the tile's image.
//!             let crop = BoundingBox::new(0.0, 512.0, 0.0, 512.0);
//!             let region = tile.read_region(Some(&crop), 2)?;
//!             println!("{}: {:?}", tile.describe(), region.dimensions());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod boundingbox;
pub mod error;
pub mod io;
pub mod loader;
pub mod tile;

// Re-export commonly used types
pub use backend::{load_manifest, JsonTilespec, JsonTilespecBackend};
pub use boundingbox::BoundingBox;
pub use error::{LoaderError, ResourceError, TileError};
pub use io::{read_grayscale, LocalResource};
pub use loader::{LoaderBackend, LoaderRegistry};
pub use tile::{BoxedTile, Dataset, Section, Tilespec, Transform};

// The 2-D sample grid type returned by region reads.
pub use image::GrayImage;
