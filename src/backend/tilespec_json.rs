//! JSON tilespec manifest backend.
//!
//! A manifest is a file holding a JSON array of tile records; a dataset on
//! disk is either one manifest file or a directory with one manifest per
//! section. This backend turns those into [`Section`]s of [`Tilespec`]
//! instances and performs the mipmap-aware region reads.
//!
//! Records are kept as raw JSON values: fields are looked up at first
//! access, so an incomplete record only fails when (and if) the missing
//! field is actually read. The expected record shape:
//!
//! ```json
//! {
//!     "bbox": [37739.197, 40867.197, 10421.167, 13145.167],
//!     "width": 3128,
//!     "height": 2724,
//!     "layer": 2,
//!     "mfov": 1,
//!     "tile_index": 1,
//!     "minIntensity": 0.0,
//!     "maxIntensity": 255.0,
//!     "transforms": [{"className": "...", "dataString": "..."}],
//!     "mipmapLevels": {"0": {"imageUrl": "file:///..."}}
//! }
//! ```

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use image::GrayImage;
use serde_json::{Map, Value};
use tracing::debug;

use crate::boundingbox::BoundingBox;
use crate::error::{LoaderError, TileError};
use crate::io::{read_grayscale, LocalResource};
use crate::loader::LoaderBackend;
use crate::tile::{BoxedTile, Dataset, Section, Tilespec, Transform};

// =============================================================================
// JsonTilespec
// =============================================================================

/// One tile record from a JSON manifest.
///
/// Holds the raw record and resolves fields lazily. Read-only after
/// construction.
pub struct JsonTilespec {
    record: Value,
}

impl JsonTilespec {
    /// Wrap a parsed manifest record.
    pub fn new(record: Value) -> Self {
        Self { record }
    }

    fn field(&self, field: &'static str) -> Result<&Value, TileError> {
        self.record
            .get(field)
            .ok_or(TileError::MissingField { field })
    }

    fn i64_field(&self, field: &'static str) -> Result<i64, TileError> {
        self.field(field)?
            .as_i64()
            .ok_or(TileError::InvalidField {
                field,
                expected: "integer",
            })
    }

    fn u32_field(&self, field: &'static str) -> Result<u32, TileError> {
        let value = self.field(field)?.as_u64().ok_or(TileError::InvalidField {
            field,
            expected: "unsigned integer",
        })?;
        u32::try_from(value).map_err(|_| TileError::InvalidField {
            field,
            expected: "unsigned 32-bit integer",
        })
    }

    fn f64_field(&self, field: &'static str) -> Result<f64, TileError> {
        self.field(field)?
            .as_f64()
            .ok_or(TileError::InvalidField {
                field,
                expected: "number",
            })
    }
}

impl Tilespec for JsonTilespec {
    fn bounding_box(&self) -> Result<BoundingBox, TileError> {
        serde_json::from_value(self.field("bbox")?.clone()).map_err(|_| TileError::InvalidField {
            field: "bbox",
            expected: "array of four numbers",
        })
    }

    fn tile_index(&self) -> Result<i64, TileError> {
        self.i64_field("tile_index")
    }

    fn mfov(&self) -> Result<i64, TileError> {
        self.i64_field("mfov")
    }

    fn layer(&self) -> Result<i64, TileError> {
        self.i64_field("layer")
    }

    fn min_intensity(&self) -> Result<f64, TileError> {
        self.f64_field("minIntensity")
    }

    fn max_intensity(&self) -> Result<f64, TileError> {
        self.f64_field("maxIntensity")
    }

    fn width(&self) -> Result<u32, TileError> {
        self.u32_field("width")
    }

    fn height(&self) -> Result<u32, TileError> {
        self.u32_field("height")
    }

    fn transforms(&self) -> Result<Vec<Transform>, TileError> {
        let entries = self
            .field("transforms")?
            .as_array()
            .ok_or(TileError::InvalidField {
                field: "transforms",
                expected: "array",
            })?;
        entries
            .iter()
            .map(|entry| {
                entry
                    .as_object()
                    .cloned()
                    .ok_or(TileError::InvalidField {
                        field: "transforms",
                        expected: "array of objects",
                    })
            })
            .collect()
    }

    fn read_region(
        &self,
        crop: Option<&BoundingBox>,
        mipmap_level: u32,
    ) -> Result<GrayImage, TileError> {
        let levels = self
            .field("mipmapLevels")?
            .as_object()
            .ok_or(TileError::InvalidField {
                field: "mipmapLevels",
                expected: "map of level to image reference",
            })?;

        let (stored_level, entry) =
            select_level(levels, mipmap_level)?.ok_or_else(|| TileError::NoMipmapLevel {
                tile: self.describe(),
                requested: mipmap_level,
            })?;

        // Decimation left to apply on top of what the stored level already
        // represents.
        let scale = 1u32 << (mipmap_level - stored_level);

        let image_url =
            entry
                .get("imageUrl")
                .and_then(Value::as_str)
                .ok_or(TileError::MissingField {
                    field: "imageUrl",
                })?;

        debug!(
            tile = %self.describe(),
            requested = mipmap_level,
            stored = stored_level,
            scale,
            "reading tile region"
        );

        let resource = LocalResource::resolve(image_url)?;
        let img = read_grayscale(resource.path())?;
        Ok(subsample(&img, crop, scale))
    }

    // TODO: implement dataset()/data() once side-car file locations are
    // standardized relative to the manifest directory.
}

/// Pick the largest stored level at or below the requested one.
///
/// Returns `Ok(None)` when every stored level is above the request.
fn select_level<'a>(
    levels: &'a Map<String, Value>,
    requested: u32,
) -> Result<Option<(u32, &'a Value)>, TileError> {
    let mut best: Option<(u32, &'a Value)> = None;
    for (key, entry) in levels {
        let level: u32 = key.parse().map_err(|_| TileError::InvalidField {
            field: "mipmapLevels",
            expected: "integer level keys",
        })?;
        if level <= requested && best.map_or(true, |(b, _)| level > b) {
            best = Some((level, entry));
        }
    }
    Ok(best)
}

/// Strided subsample of a decoded image, optionally cropped first.
///
/// Crop coordinates are pixel offsets into `img`; they truncate to the image
/// bounds, and an inverted window yields an empty grid. Without a crop the
/// whole image is sampled at `step` along both axes starting at 0, so the
/// result has shape `(ceil(h / step), ceil(w / step))`.
fn subsample(img: &GrayImage, crop: Option<&BoundingBox>, step: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    let (x0, x1, y0, y1) = match crop {
        None => (0, width, 0, height),
        Some(window) => (
            clamp_coord(window.x0(), width),
            clamp_coord(window.x1(), width),
            clamp_coord(window.y0(), height),
            clamp_coord(window.y1(), height),
        ),
    };

    let cols: Vec<u32> = (x0..x1).step_by(step as usize).collect();
    let rows: Vec<u32> = (y0..y1).step_by(step as usize).collect();

    let mut out = GrayImage::new(cols.len() as u32, rows.len() as u32);
    for (out_y, &src_y) in rows.iter().enumerate() {
        for (out_x, &src_x) in cols.iter().enumerate() {
            out.put_pixel(out_x as u32, out_y as u32, *img.get_pixel(src_x, src_y));
        }
    }
    out
}

/// Truncate a crop coordinate to a valid pixel offset in `[0, max]`.
fn clamp_coord(value: f64, max: u32) -> u32 {
    if value <= 0.0 {
        0
    } else {
        (value as u64).min(u64::from(max)) as u32
    }
}

// =============================================================================
// Manifest loading
// =============================================================================

/// Load a single tilespec manifest as a section.
///
/// The file is parsed up front; tile objects materialize lazily as the
/// section is iterated, and the section is single-pass.
///
/// # Errors
///
/// * [`LoaderError::CannotRead`] - the content is not a JSON array of
///   records (the "not my format" signal, never a parse-specific error)
/// * [`LoaderError::Io`] - the file cannot be opened or read
pub fn load_manifest(path: &Path) -> Result<Section, LoaderError> {
    let file = File::open(path)?;
    let records: Vec<Value> =
        serde_json::from_reader(BufReader::new(file)).map_err(|_| LoaderError::CannotRead {
            path: path.to_path_buf(),
        })?;

    debug!(path = %path.display(), records = records.len(), "parsed tilespec manifest");

    Ok(Section::new(Box::new(
        records
            .into_iter()
            .map(|record| Box::new(JsonTilespec::new(record)) as BoxedTile),
    )))
}

// =============================================================================
// JsonTilespecBackend
// =============================================================================

/// Loader backend for JSON tilespec manifests.
///
/// A directory loads as one section per directory entry, in listing order —
/// callers must not assume a particular section ordering. A single file
/// loads as a one-section dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTilespecBackend;

impl JsonTilespecBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self
    }
}

impl LoaderBackend for JsonTilespecBackend {
    fn load(&self, path: &Path) -> Result<Dataset, LoaderError> {
        if path.is_dir() {
            let mut sections = Vec::new();
            for entry in fs::read_dir(path)? {
                sections.push(load_manifest(&entry?.path())?);
            }
            Ok(Dataset::new(sections))
        } else if path.is_file() {
            Ok(Dataset::new(vec![load_manifest(path)?]))
        } else {
            Err(LoaderError::CannotRead {
                path: path.to_path_buf(),
            })
        }
    }

    fn check(&self, path: &Path) -> bool {
        path.is_dir()
            || (path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
    }
}

// =============================================================================
// Tests
// =============================================================================
