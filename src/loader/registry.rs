//! Loader registry: match an opaque path to exactly one backend.
//!
//! Callers hand the registry a path without knowing which backend applies.
//! The registry tries each registered backend in turn and returns the first
//! non-empty result; backends signal "this is not my format" with
//! [`LoaderError::CannotRead`], which the registry recovers from by moving
//! on. Every other backend error propagates unchanged.
//!
//! The registry is an explicit, statically-constructed mapping from backend
//! name to implementation — backends are injected at construction (or via
//! [`LoaderRegistry::register`]) rather than discovered through runtime
//! metadata scanning.

use std::path::Path;

use tracing::debug;

use crate::backend::JsonTilespecBackend;
use crate::error::LoaderError;
use crate::tile::Dataset;

// =============================================================================
// LoaderBackend Trait
// =============================================================================

/// A registered loader backend.
///
/// The registry consumes backends through two calls: a full
/// [`load`](Self::load) and a cheaper check-mode
/// [`check`](Self::check) used by
/// [`LoaderRegistry::can_load`].
pub trait LoaderBackend: Send + Sync {
    /// Try to load the dataset at `path`.
    ///
    /// Return [`LoaderError::CannotRead`] when the path is not in this
    /// backend's format — the registry will try the next backend. Any other
    /// error is treated as a real failure and propagates to the caller.
    fn load(&self, path: &Path) -> Result<Dataset, LoaderError>;

    /// Answer cheaply whether this backend could, in principle, handle
    /// `path`, without performing a full load.
    fn check(&self, path: &Path) -> bool;
}

// =============================================================================
// LoaderRegistry
// =============================================================================

struct RegistryEntry {
    name: String,
    backend: Box<dyn LoaderBackend>,
}

/// Registry of named loader backends with a first-success selection policy.
///
/// Backends are tried in registration order, but that order is an
/// implementation detail — callers must not depend on which backend wins
/// when several could read a path.
///
/// An optional *pinned* loader name restricts selection to a single backend;
/// see [`set_loader_name`](Self::set_loader_name). The pin is plain instance
/// state: registries are cheap, and callers that need different pins
/// concurrently should use separate registries.
///
/// # Example
///
/// ```no_run
/// use tilespec::{LoaderRegistry, Tilespec};
///
/// let registry = LoaderRegistry::with_default_backends();
/// let dataset = registry.load("/data/w01/tilespecs".as_ref())?;
/// for section in dataset {
///     for tile in section {
///         println!("{}", tile.describe());
///     }
/// }
/// # Ok::<(), tilespec::LoaderError>(())
/// ```
pub struct LoaderRegistry {
    entries: Vec<RegistryEntry>,
    pinned: Option<String>,
}

impl LoaderRegistry {
    /// Create an empty registry. A registry with no backends declines every
    /// path.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            pinned: None,
        }
    }

    /// Create a registry with the built-in backends registered:
    /// `"tilespec"` → [`JsonTilespecBackend`].
    pub fn with_default_backends() -> Self {
        let mut registry = Self::new();
        registry.register("tilespec", Box::new(JsonTilespecBackend::new()));
        registry
    }

    /// Register a named backend.
    pub fn register(&mut self, name: impl Into<String>, backend: Box<dyn LoaderBackend>) {
        self.entries.push(RegistryEntry {
            name: name.into(),
            backend,
        });
    }

    /// Restrict loading to the named backend, or restore try-all behavior
    /// with `None`.
    ///
    /// Pinning a name that matches no registered backend makes every load
    /// fail with [`LoaderError::NoLoaderAvailable`].
    pub fn set_loader_name(&mut self, name: Option<&str>) {
        self.pinned = name.map(str::to_string);
    }

    /// The currently pinned loader name, if any.
    pub fn loader_name(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    /// Names of the registered backends, in registration order.
    pub fn backend_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Given a path of some kind, try every backend to load it.
    ///
    /// The first backend returning a non-empty dataset (at least one
    /// section) wins and no further backends are tried. Backends that raise
    /// [`LoaderError::CannotRead`] — or that succeed with an *empty* dataset
    /// — are skipped. The two cases are deliberately indistinguishable here:
    /// a backend that parses a dataset with zero sections looks exactly like
    /// one that did not recognize the path, and the registry keeps trying.
    ///
    /// # Errors
    ///
    /// * [`LoaderError::NoLoaderAvailable`] - every backend declined, or
    ///   none are registered (or none match the pinned name)
    /// * any non-`CannotRead` backend error, propagated unchanged
    pub fn load(&self, path: &Path) -> Result<Dataset, LoaderError> {
        for entry in self.candidates() {
            debug!(loader = %entry.name, path = %path.display(), "trying loader");
            match entry.backend.load(path) {
                Ok(dataset) if !dataset.is_empty() => {
                    debug!(
                        loader = %entry.name,
                        sections = dataset.len(),
                        "loader succeeded"
                    );
                    return Ok(dataset);
                }
                Ok(_) => {
                    debug!(loader = %entry.name, "loader returned an empty dataset");
                }
                Err(err) if err.is_cannot_read() => {
                    debug!(loader = %entry.name, "loader declined");
                }
                Err(err) => return Err(err),
            }
        }
        Err(LoaderError::NoLoaderAvailable {
            path: path.to_path_buf(),
        })
    }

    /// See whether `path` points at something some backend can load.
    ///
    /// Uses each backend's cheap check-mode call instead of a full load.
    /// Respects the pinned loader name. Returns `false` when the registry is
    /// empty.
    pub fn can_load(&self, path: &Path) -> bool {
        self.candidates().any(|entry| entry.backend.check(path))
    }

    fn candidates(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries
            .iter()
            .filter(move |entry| match &self.pinned {
                Some(pinned) => entry.name == *pinned,
                None => true,
            })
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::with_default_backends()
    }
}

// =============================================================================
// Tests
// =============================================================================
