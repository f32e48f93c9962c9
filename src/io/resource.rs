//! Scoped resolution of image locators to local filesystem paths.
//!
//! Tile records reference their images by locator strings that are either
//! local paths (bare or `file:` URLs) or fetchable remote URLs. The read path
//! only ever wants a local file, so [`LocalResource`] resolves a locator to a
//! path for the duration of a scope:
//!
//! - a local locator is passed through with nothing to release;
//! - a remote locator is fetched into a temporary file that is deleted when
//!   the guard drops, on every exit path.
//!
//! The guard never retries failed fetches and never caches fetched content
//! across calls.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;
use url::Url;

use crate::error::ResourceError;

// =============================================================================
// LocalResource
// =============================================================================

/// A locator resolved to a local path, valid for the guard's lifetime.
///
/// Dropping the guard deletes any temporary file allocated for a remote
/// fetch; locally-backed resources own nothing and dropping them is free.
///
/// # Example
///
/// ```ignore
/// let resource = LocalResource::resolve("file:///data/sec001/tile_0.png")?;
/// let img = read_grayscale(resource.path())?;
/// // temp file (if any) removed here
/// ```
#[derive(Debug)]
pub struct LocalResource {
    path: PathBuf,
    /// Present only for fetched resources; deletion happens on drop.
    temp: Option<NamedTempFile>,
}

impl LocalResource {
    /// Resolve a locator string to a local filesystem path.
    ///
    /// # Arguments
    ///
    /// * `locator` - a bare filesystem path, a `file:` URL, or an
    ///   `http:`/`https:` URL
    ///
    /// # Errors
    ///
    /// * [`ResourceError::InvalidLocator`] - `file:` URL with no usable path,
    ///   or a URL scheme this crate cannot fetch
    /// * [`ResourceError::Fetch`] / [`ResourceError::Status`] - remote fetch
    ///   failures; never retried
    pub fn resolve(locator: &str) -> Result<Self, ResourceError> {
        match Url::parse(locator) {
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| ResourceError::InvalidLocator {
                        locator: locator.to_string(),
                        reason: "file URL has no local path".to_string(),
                    })?;
                Ok(Self { path, temp: None })
            }
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Self::fetch(&url),
            Ok(url) => Err(ResourceError::InvalidLocator {
                locator: locator.to_string(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            }),
            // Not a URL at all: treat it as a plain filesystem path.
            Err(_) => Ok(Self {
                path: PathBuf::from(locator),
                temp: None,
            }),
        }
    }

    /// Fetch a remote resource into a temporary file.
    fn fetch(url: &Url) -> Result<Self, ResourceError> {
        debug!(url = %url, "fetching remote resource");

        let mut response =
            reqwest::blocking::get(url.clone()).map_err(|e| ResourceError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        if !response.status().is_success() {
            return Err(ResourceError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let mut temp = NamedTempFile::new()?;
        io::copy(&mut response, temp.as_file_mut()).map_err(|e| ResourceError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            path: temp.path().to_path_buf(),
            temp: Some(temp),
        })
    }

    /// The local path. Valid until the guard is dropped.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if this resource is backed by a temporary download.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }
}

// =============================================================================
// Tests
// =============================================================================
