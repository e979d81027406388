//! Upload storage hooks.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

/// Storage abstraction the gate cleans uploads through.
///
/// The gate needs exactly two operations: check whether a stored upload
/// still exists and remove it. [`DiskStore`] covers the common case of
/// uploads parked on the local filesystem; deployments that stream
/// uploads elsewhere implement this for their own storage.
pub trait FileStore: Debug + Send + Sync {
    /// Whether a stored upload exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Removes the stored upload at `path`.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// [`FileStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl FileStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
