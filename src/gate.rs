//! The validation gate.
//!
//! [`ValidationGate`] ties the pieces together: it verifies every
//! location of a request against a [`Schema`], aggregates the results
//! into a [`FieldReport`], formats a rejection body when anything
//! failed, and cleans up stored uploads that no handler will consume.

use serde_json::Value;

use crate::adapter::RequestAdapter;
use crate::error::GateError;
use crate::format::{DefaultFormatter, ErrorFormatter};
use crate::location::Location;
use crate::report::FieldReport;
use crate::request::{merged_files, RequestParts};
use crate::schema::Schema;
use crate::store::{DiskStore, FileStore};
use crate::verify::verify_location;

/// Status code used when no override is configured.
const DEFAULT_ERROR_CODE: u16 = 400;

/// Response data for a rejected request.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// HTTP status code to respond with.
    pub status: u16,
    /// Response body produced by the configured formatter.
    pub body: Value,
}

/// Result of checking one request against the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every verified location passed; the request may proceed.
    Continue,
    /// At least one check failed; respond with the contained rejection.
    Reject(Rejection),
}

impl Outcome {
    /// Whether this outcome lets the request proceed.
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue)
    }

    /// Returns the rejection, if the request was rejected.
    pub fn into_rejection(self) -> Option<Rejection> {
        match self {
            Outcome::Continue => None,
            Outcome::Reject(rejection) => Some(rejection),
        }
    }
}

/// Checks requests against a schema and builds rejections for failures.
///
/// A gate is built once per route and reused across requests. All
/// configuration is optional: by default failures are reported with
/// status 400, the default envelope, and upload cleanup enabled.
///
/// # Examples
///
/// ```
/// use request_gate::{FieldRule, Outcome, RequestAdapter, Schema, SubSchema, ValidationGate};
/// use serde_json::json;
///
/// let schema: Schema = Schema::new()
///     .body(SubSchema::new().field("name", FieldRule::required()));
/// let gate = ValidationGate::new(schema);
///
/// let mut request = RequestAdapter::new();
/// request.add_body_field("name", "Ada");
/// assert!(gate.check(&request).unwrap().is_continue());
///
/// let empty = RequestAdapter::new();
/// match gate.check(&empty).unwrap() {
///     Outcome::Reject(rejection) => {
///         assert_eq!(rejection.status, 400);
///         assert_eq!(
///             rejection.body["fields"]["body"]["name"],
///             json!("name is required"),
///         );
///     }
///     Outcome::Continue => unreachable!(),
/// }
/// ```
pub struct ValidationGate<R = RequestAdapter> {
    schema: Schema<R>,
    error_code: u16,
    formatter: Box<dyn ErrorFormatter + Send + Sync>,
    cleanup_uploads: bool,
    store: Box<dyn FileStore>,
}

impl<R: RequestParts> ValidationGate<R> {
    /// Creates a gate for `schema` with default configuration.
    pub fn new(schema: Schema<R>) -> Self {
        Self {
            schema,
            error_code: DEFAULT_ERROR_CODE,
            formatter: Box::new(DefaultFormatter),
            cleanup_uploads: true,
            store: Box::new(DiskStore),
        }
    }

    /// Overrides the HTTP status used for rejections.
    pub fn error_code(mut self, code: u16) -> Self {
        self.error_code = code;
        self
    }

    /// Replaces the rejection body formatter.
    ///
    /// Closures work directly:
    ///
    /// ```
    /// use request_gate::{FieldReport, Schema, ValidationGate};
    /// use serde_json::json;
    ///
    /// let schema: Schema = Schema::new();
    /// let gate = ValidationGate::new(schema)
    ///     .formatter(|report: &FieldReport| json!({ "failed": report.is_failure() }));
    /// # let _ = gate;
    /// ```
    pub fn formatter(mut self, formatter: impl ErrorFormatter + Send + Sync + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Enables or disables upload cleanup on rejection. Enabled by
    /// default.
    pub fn cleanup_uploads(mut self, enabled: bool) -> Self {
        self.cleanup_uploads = enabled;
        self
    }

    /// Replaces the storage backend used for upload cleanup.
    pub fn store(mut self, store: impl FileStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Checks `request` against the schema.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::Cleanup`] when a stored upload could not be
    /// removed. Validation failures are not errors; they come back as
    /// [`Outcome::Reject`].
    pub fn check(&self, request: &R) -> Result<Outcome, GateError> {
        // 1. A schema with no sub-schemas verifies nothing.
        if self.schema.is_empty() {
            tracing::debug!("schema has no sub-schemas; request passes");
            return Ok(Outcome::Continue);
        }

        // 2. Verify every location and aggregate into the report.
        let mut report = FieldReport::default();
        for location in Location::ALL {
            let errors = verify_location(self.schema.sub_schema(location), location, request);
            report.set(location, errors);
        }

        if !report.is_failure() {
            tracing::debug!("request passed validation");
            return Ok(Outcome::Continue);
        }

        // 3. The handler will never run, so stored uploads would leak.
        //    Cleanup only applies when the schema covers files at all.
        if self.cleanup_uploads && self.schema.sub_schema(Location::Files).is_some() {
            self.clean_up_uploads(request)?;
        }

        // 4. Format the rejection.
        tracing::warn!(status = self.error_code, "request failed validation");
        let body = self.formatter.format(&report);
        Ok(Outcome::Reject(Rejection {
            status: self.error_code,
            body,
        }))
    }

    /// Removes every stored upload reachable through the merged view of
    /// the upload collection and the single-file alias.
    fn clean_up_uploads(&self, request: &R) -> Result<(), GateError> {
        for (field, files) in merged_files(request) {
            for file in files {
                let path = file.path();
                if !self.store.exists(path) {
                    continue;
                }
                self.store
                    .remove(path)
                    .map_err(|source| GateError::Cleanup {
                        path: path.to_path_buf(),
                        source,
                    })?;
                tracing::debug!(field, path = %path.display(), "removed uploaded file");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::UploadedFile;
    use crate::schema::{FieldRule, SubSchema};
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    /// Pretends every path exists and records removals.
    #[derive(Debug, Clone, Default)]
    struct RecordingStore {
        removed: Arc<Mutex<Vec<PathBuf>>>,
        missing: bool,
    }

    impl RecordingStore {
        fn removed(&self) -> Vec<PathBuf> {
            self.removed.lock().expect("lock").clone()
        }
    }

    impl FileStore for RecordingStore {
        fn exists(&self, _path: &Path) -> bool {
            !self.missing
        }

        fn remove(&self, path: &Path) -> io::Result<()> {
            self.removed.lock().expect("lock").push(path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Debug)]
    struct FailingStore;

    impl FileStore for FailingStore {
        fn exists(&self, _path: &Path) -> bool {
            true
        }

        fn remove(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    fn files_schema() -> Schema {
        Schema::new().files(SubSchema::new().field("avatar", FieldRule::required()))
    }

    fn request_with_uploads() -> RequestAdapter {
        let mut request = RequestAdapter::new();
        request.add_file("gallery", UploadedFile::new("/tmp/g1"));
        request.add_file("gallery", UploadedFile::new("/tmp/g2"));
        request.set_single_file("extra", UploadedFile::new("/tmp/e1"));
        request
    }

    #[test]
    fn cleanup_covers_collection_and_alias() {
        let store = RecordingStore::default();
        let gate = ValidationGate::new(files_schema()).store(store.clone());

        let outcome = gate.check(&request_with_uploads()).expect("no store error");
        assert!(!outcome.is_continue());
        assert_eq!(
            store.removed(),
            vec![
                PathBuf::from("/tmp/g1"),
                PathBuf::from("/tmp/g2"),
                PathBuf::from("/tmp/e1"),
            ]
        );
    }

    #[test]
    fn cleanup_skipped_when_disabled() {
        let store = RecordingStore::default();
        let gate = ValidationGate::new(files_schema())
            .cleanup_uploads(false)
            .store(store.clone());

        let outcome = gate.check(&request_with_uploads()).expect("no store error");
        assert!(!outcome.is_continue());
        assert!(store.removed().is_empty());
    }

    #[test]
    fn cleanup_skipped_without_a_files_sub_schema() {
        let store = RecordingStore::default();
        let schema = Schema::new().body(SubSchema::new().field("name", FieldRule::required()));
        let gate = ValidationGate::new(schema).store(store.clone());

        let outcome = gate.check(&request_with_uploads()).expect("no store error");
        assert!(!outcome.is_continue());
        assert!(store.removed().is_empty());
    }

    #[test]
    fn cleanup_skips_paths_the_store_no_longer_has() {
        let store = RecordingStore {
            missing: true,
            ..RecordingStore::default()
        };
        let gate = ValidationGate::new(files_schema()).store(store.clone());

        gate.check(&request_with_uploads()).expect("no store error");
        assert!(store.removed().is_empty());
    }

    #[test]
    fn failed_removal_surfaces_as_cleanup_error() {
        let gate = ValidationGate::new(files_schema()).store(FailingStore);

        match gate.check(&request_with_uploads()) {
            Err(GateError::Cleanup { path, .. }) => {
                assert_eq!(path, PathBuf::from("/tmp/g1"));
            }
            other => panic!("expected cleanup error, got {other:?}"),
        }
    }

    #[test]
    fn passing_request_never_touches_the_store() {
        let store = RecordingStore::default();
        let gate = ValidationGate::new(files_schema()).store(store.clone());

        let mut request = request_with_uploads();
        request.add_file("avatar", UploadedFile::new("/tmp/a1"));

        let outcome = gate.check(&request).expect("no store error");
        assert!(outcome.is_continue());
        assert!(store.removed().is_empty());
    }
}
