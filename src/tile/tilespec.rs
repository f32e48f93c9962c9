//! Tilespec trait for backend-agnostic tile access.
//!
//! This module defines the `Tilespec` trait, the contract every
//! backend-specific tile representation must satisfy. It lets consumers
//! (stitching and rendering pipelines) enumerate tiles and read pixel
//! regions without knowing which backend produced a given tile.
//!
//! Accessors are fallible: backends hold raw manifest records and do not
//! pre-validate them, so a missing or mistyped field surfaces as an error at
//! first access rather than at load time.

use bytes::Bytes;
use image::GrayImage;

use crate::boundingbox::BoundingBox;
use crate::error::TileError;

/// An opaque coordinate-transform descriptor.
///
/// Transforms map a tile into global image space. This crate passes them
/// through unmodified — each is a mapping of implementation-defined keys
/// (typically a class name and an encoded parameter string) that downstream
/// renderers know how to interpret.
pub type Transform = serde_json::Map<String, serde_json::Value>;

// =============================================================================
// Tilespec Trait
// =============================================================================

/// Backend-agnostic interface to one imaged tile.
///
/// A tile is identified by the triple `(layer, mfov, tile_index)`: layer is
/// the Z-section number, mfov the mid-field-of-view group within the
/// section, and tile_index the position within that group. The triple is
/// expected to be unique within one loaded dataset, but duplicates are a
/// caller error, not a checked condition.
///
/// Implementations are read-only after construction and freely shareable
/// across threads.
pub trait Tilespec: Send + Sync {
    /// Get the bounding box giving the global extents of the tile.
    fn bounding_box(&self) -> Result<BoundingBox, TileError>;

    /// Get the index of the tile within its MFOV.
    fn tile_index(&self) -> Result<i64, TileError>;

    /// Get the MFOV index within the section.
    fn mfov(&self) -> Result<i64, TileError>;

    /// Get the Z layer of the tile's section.
    fn layer(&self) -> Result<i64, TileError>;

    /// Get the minimum intensity value the sensor can produce.
    ///
    /// This is the range of representable values, not a statistic derived
    /// from pixel content.
    fn min_intensity(&self) -> Result<f64, TileError>;

    /// Get the maximum intensity value the sensor can produce.
    fn max_intensity(&self) -> Result<f64, TileError>;

    /// Get the width of the tile in pixels.
    fn width(&self) -> Result<u32, TileError>;

    /// Get the height of the tile in pixels.
    fn height(&self) -> Result<u32, TileError>;

    /// Get the transforms that map the tile into global image space, in
    /// manifest order and passed through verbatim.
    fn transforms(&self) -> Result<Vec<Transform>, TileError>;

    /// Read the image associated with this tile.
    ///
    /// Storage backends keep a sparse set of pre-decimated pyramid levels,
    /// not every power of two. The read selects the largest stored level at
    /// or below `mipmap_level` and finishes the remaining decimation by
    /// strided sampling, so a request never pays for more resolution than it
    /// asked for and no level needs to be pre-rendered.
    ///
    /// # Arguments
    ///
    /// * `crop` - optional window given as pixel offsets into the selected
    ///   level's decoded full image (not global space); `None` reads the
    ///   whole image. Out-of-range coordinates truncate to the image bounds.
    /// * `mipmap_level` - requested decimation; the result is shrunk by
    ///   `2^mipmap_level` relative to level 0
    ///
    /// # Errors
    ///
    /// * [`TileError::NoMipmapLevel`] - no stored level is at or below the
    ///   requested level
    fn read_region(
        &self,
        crop: Option<&BoundingBox>,
        mipmap_level: u32,
    ) -> Result<GrayImage, TileError>;

    /// Read a named dataset from a side-car data file associated with this
    /// tile.
    ///
    /// # Arguments
    ///
    /// * `filename` - a relative-path filename of some data item; the
    ///   backend knows how to use it together with the tile's context
    ///
    /// Backends without side-car support return
    /// [`TileError::Unsupported`] rather than silently returning empty data.
    fn dataset(&self, filename: &str) -> Result<Bytes, TileError> {
        let _ = filename;
        Err(TileError::Unsupported {
            operation: "side-car dataset access",
        })
    }

    /// Read the raw contents of a side-car file associated with this tile.
    ///
    /// Backends without side-car support return
    /// [`TileError::Unsupported`].
    fn data(&self, filename: &str) -> Result<Bytes, TileError> {
        let _ = filename;
        Err(TileError::Unsupported {
            operation: "side-car data access",
        })
    }

    /// Short human-readable identification, `tile <layer>:<mfov>:<index>`.
    ///
    /// Used in log and error messages. Falls back to a placeholder when the
    /// identifying fields cannot be read.
    fn describe(&self) -> String {
        match (self.layer(), self.mfov(), self.tile_index()) {
            (Ok(layer), Ok(mfov), Ok(index)) => format!("tile {}:{}:{}", layer, mfov, index),
            _ => "tile <unidentified>".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal in-memory tile for exercising the trait's provided methods.
    struct FixedTile {
        layer: i64,
        mfov: i64,
        tile_index: i64,
    }

    impl Tilespec for FixedTile {
        fn bounding_box(&self) -> Result<BoundingBox, TileError> {
            Ok(BoundingBox::new(0.0, 1.0, 0.0, 1.0))
        }

        fn tile_index(&self) -> Result<i64, TileError> {
            Ok(self.tile_index)
        }

        fn mfov(&self) -> Result<i64, TileError> {
            Ok(self.mfov)
        }

        fn layer(&self) -> Result<i64, TileError> {
            Ok(self.layer)
        }

        fn min_intensity(&self) -> Result<f64, TileError> {
            Ok(0.0)
        }

        fn max_intensity(&self) -> Result<f64, TileError> {
            Ok(255.0)
        }

        fn width(&self) -> Result<u32, TileError> {
            Ok(1)
        }

        fn height(&self) -> Result<u32, TileError> {
            Ok(1)
        }

        fn transforms(&self) -> Result<Vec<Transform>, TileError> {
            Ok(Vec::new())
        }

        fn read_region(
            &self,
            _crop: Option<&BoundingBox>,
            _mipmap_level: u32,
        ) -> Result<GrayImage, TileError> {
            Ok(GrayImage::new(1, 1))
        }
    }

    /// Tile whose identifying fields are unreadable.
    struct BrokenTile;

    impl Tilespec for BrokenTile {
        fn bounding_box(&self) -> Result<BoundingBox, TileError> {
            Err(TileError::MissingField { field: "bbox" })
        }

        fn tile_index(&self) -> Result<i64, TileError> {
            Err(TileError::MissingField { field: "tile_index" })
        }

        fn mfov(&self) -> Result<i64, TileError> {
            Err(TileError::MissingField { field: "mfov" })
        }

        fn layer(&self) -> Result<i64, TileError> {
            Err(TileError::MissingField { field: "layer" })
        }

        fn min_intensity(&self) -> Result<f64, TileError> {
            Err(TileError::MissingField {
                field: "minIntensity",
            })
        }

        fn max_intensity(&self) -> Result<f64, TileError> {
            Err(TileError::MissingField {
                field: "maxIntensity",
            })
        }

        fn width(&self) -> Result<u32, TileError> {
            Err(TileError::MissingField { field: "width" })
        }

        fn height(&self) -> Result<u32, TileError> {
            Err(TileError::MissingField { field: "height" })
        }

        fn transforms(&self) -> Result<Vec<Transform>, TileError> {
            Err(TileError::MissingField { field: "transforms" })
        }

        fn read_region(
            &self,
            _crop: Option<&BoundingBox>,
            _mipmap_level: u32,
        ) -> Result<GrayImage, TileError> {
            Err(TileError::MissingField {
                field: "mipmapLevels",
            })
        }
    }

    #[test]
    fn test_describe() {
        let tile = FixedTile {
            layer: 2,
            mfov: 1,
            tile_index: 7,
        };
        assert_eq!(tile.describe(), "tile 2:1:7");
    }

    #[test]
    fn test_describe_fallback() {
        assert_eq!(BrokenTile.describe(), "tile <unidentified>");
    }

    #[test]
    fn test_sidecar_accessors_default_to_unsupported() {
        let tile = FixedTile {
            layer: 0,
            mfov: 0,
            tile_index: 0,
        };
        assert!(matches!(
            tile.dataset("sift/features.h5"),
            Err(TileError::Unsupported { .. })
        ));
        assert!(matches!(
            tile.data("notes.txt"),
            Err(TileError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_trait_is_object_safe() {
        let tile: Box<dyn Tilespec> = Box::new(FixedTile {
            layer: 1,
            mfov: 2,
            tile_index: 3,
        });
        assert_eq!(tile.layer().unwrap(), 1);
        assert_eq!(tile.describe(), "tile 1:2:3");
    }
}
