//! Backend resolution: the loader registry and the backend seam.

mod registry;

pub use registry::{LoaderBackend, LoaderRegistry};
