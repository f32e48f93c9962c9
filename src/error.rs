use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving an image locator to a local path
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The locator is not a usable file reference
    #[error("Invalid resource locator: {locator}: {reason}")]
    InvalidLocator { locator: String, reason: String },

    /// Network or protocol error while fetching a remote resource
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    /// Remote server answered with a non-success status
    #[error("Fetch failed for {url}: HTTP status {status}")]
    Status { url: String, status: u16 },

    /// Filesystem error while staging the resource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the tile contract at metadata access or read time
#[derive(Debug, Error)]
pub enum TileError {
    /// No stored mipmap level is at or below the requested level
    #[error("Unable to find suitable mipmap level <= {requested} in {tile}")]
    NoMipmapLevel { tile: String, requested: u32 },

    /// A required record field is absent
    #[error("Missing tile record field: {field}")]
    MissingField { field: &'static str },

    /// A record field is present but has the wrong shape
    #[error("Invalid tile record field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// The backend does not implement an optional capability
    #[error("Unsupported operation: {operation}")]
    Unsupported { operation: &'static str },

    /// Error while resolving the level's image resource
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// Error while decoding the level's image
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// Filesystem error on the read path
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors exchanged between loader backends and the registry.
///
/// `CannotRead` is a backend-internal signal: the registry catches it and
/// moves on to the next backend, and it never reaches the end caller. Every
/// other variant propagates unchanged.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The backend does not recognize the content at this path
    #[error("Loader cannot read tilespecs from {}", path.display())]
    CannotRead { path: PathBuf },

    /// Every registered backend declined, or none are registered
    #[error("No loader for tilespec {}", path.display())]
    NoLoaderAvailable { path: PathBuf },

    /// Filesystem error while enumerating or opening manifests
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoaderError {
    /// True if this is the backend-internal "not my format" signal.
    pub fn is_cannot_read(&self) -> bool {
        matches!(self, LoaderError::CannotRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mipmap_level_message() {
        let err = TileError::NoMipmapLevel {
            tile: "tile 2:1:1".to_string(),
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Unable to find suitable mipmap level <= 3 in tile 2:1:1"
        );
    }

    #[test]
    fn test_is_cannot_read() {
        let err = LoaderError::CannotRead {
            path: PathBuf::from("/foo/bar"),
        };
        assert!(err.is_cannot_read());

        let err = LoaderError::NoLoaderAvailable {
            path: PathBuf::from("/foo/bar"),
        };
        assert!(!err.is_cannot_read());
    }

    #[test]
    fn test_resource_error_converts_into_tile_error() {
        let err = ResourceError::Status {
            url: "http://example.org/tile.png".to_string(),
            status: 404,
        };
        let tile_err: TileError = err.into();
        assert!(matches!(tile_err, TileError::Resource(_)));
    }
}
