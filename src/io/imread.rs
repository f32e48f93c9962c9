//! Grayscale decode boundary.
//!
//! Backends hand this module a local path and get back a 2-D grid of 8-bit
//! intensity samples. The decode algorithm itself belongs to the `image`
//! crate; this module only owns the "local path, single-channel" contract.

use std::path::Path;

use image::{GrayImage, ImageReader};

use crate::error::TileError;

/// Decode an image file as a single-channel intensity grid.
///
/// The format is guessed from the file content, so the locator's file
/// extension (or lack of one, for temporary downloads) does not matter.
/// Multi-channel sources are converted to 8-bit luma.
///
/// # Errors
///
/// * [`TileError::Io`] - the file cannot be opened or read
/// * [`TileError::Decode`] - the content is not a decodable image
pub fn read_grayscale(path: &Path) -> Result<GrayImage, TileError> {
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let img = reader.decode()?;
    Ok(img.into_luma8())
}

// =============================================================================
// Tests
// =============================================================================
