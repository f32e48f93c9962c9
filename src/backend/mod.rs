//! Storage backends.
//!
//! Each backend knows how to turn one on-disk (or remote) representation of
//! a tiled dataset into [`Section`](crate::Section)s of
//! [`Tilespec`](crate::Tilespec) instances. Backends register with the
//! [`LoaderRegistry`](crate::LoaderRegistry), which picks the right one for
//! a given path.

mod tilespec_json;

pub use tilespec_json::{load_manifest, JsonTilespec, JsonTilespecBackend};
